//! Template rescaling to candidate region dimensions.

use crate::image::{ImageView, OwnedImage};
use crate::util::{PlateMatchError, PlateMatchResult};

/// Sampling used when a template is rescaled to a region.
///
/// The choice only affects recall; matching semantics are identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest-neighbour sampling.
    Nearest,
    /// Bilinear sampling with pixel-center alignment.
    #[default]
    Bilinear,
}

/// Resizes a grayscale image to exactly `width x height`.
///
/// Destination pixel centers map to source coordinates as
/// `src = (dst + 0.5) * (src_len / dst_len) - 0.5`. For bilinear sampling,
/// coordinates left of the first pixel clamp to it and coordinates past the
/// last pixel use it unweighted. Values are rounded to the nearest integer.
/// Resizing to the source dimensions returns an exact copy.
pub fn resize_u8(
    src: ImageView<'_, u8>,
    width: usize,
    height: usize,
    interpolation: Interpolation,
) -> PlateMatchResult<OwnedImage> {
    if width == 0 || height == 0 {
        return Err(PlateMatchError::InvalidDimensions { width, height });
    }
    if width == src.width() && height == src.height() {
        return Ok(OwnedImage::from_view(src));
    }

    let scale_x = src.width() as f32 / width as f32;
    let scale_y = src.height() as f32 / height as f32;
    let mut out = Vec::with_capacity(width * height);

    match interpolation {
        Interpolation::Nearest => {
            let xs: Vec<usize> = (0..width)
                .map(|x| ((x as f32 * scale_x).floor() as usize).min(src.width() - 1))
                .collect();
            for y in 0..height {
                let sy = ((y as f32 * scale_y).floor() as usize).min(src.height() - 1);
                let row = src.row(sy).ok_or(out_of_range(src))?;
                out.extend(xs.iter().map(|&sx| row[sx]));
            }
        }
        Interpolation::Bilinear => {
            let xs: Vec<(usize, usize, f32)> = (0..width)
                .map(|x| axis_taps(x, scale_x, src.width()))
                .collect();
            for y in 0..height {
                let (y0, y1, fy) = axis_taps(y, scale_y, src.height());
                let row0 = src.row(y0).ok_or(out_of_range(src))?;
                let row1 = src.row(y1).ok_or(out_of_range(src))?;
                for &(x0, x1, fx) in &xs {
                    let top = row0[x0] as f32 * (1.0 - fx) + row0[x1] as f32 * fx;
                    let bottom = row1[x0] as f32 * (1.0 - fx) + row1[x1] as f32 * fx;
                    let value = top * (1.0 - fy) + bottom * fy;
                    out.push(value.round().clamp(0.0, 255.0) as u8);
                }
            }
        }
    }

    OwnedImage::new(out, width, height)
}

/// Returns the two source taps and the weight of the second one.
fn axis_taps(dst: usize, scale: f32, src_len: usize) -> (usize, usize, f32) {
    let pos = (dst as f32 + 0.5) * scale - 0.5;
    if pos <= 0.0 {
        return (0, 0, 0.0);
    }
    let base = pos.floor();
    let i0 = base as usize;
    if i0 >= src_len - 1 {
        return (src_len - 1, src_len - 1, 0.0);
    }
    (i0, i0 + 1, pos - base)
}

fn out_of_range(src: ImageView<'_, u8>) -> PlateMatchError {
    PlateMatchError::BufferTooSmall {
        needed: src.height() * src.stride(),
        got: src.as_slice().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::{resize_u8, Interpolation};
    use crate::image::ImageView;

    #[test]
    fn same_size_is_identity() {
        let data: Vec<u8> = (0u8..20).collect();
        let view = ImageView::from_slice(&data, 5, 4).unwrap();
        for interpolation in [Interpolation::Nearest, Interpolation::Bilinear] {
            let out = resize_u8(view, 5, 4, interpolation).unwrap();
            assert_eq!(out.data(), data.as_slice());
        }
    }

    #[test]
    fn bilinear_upscale_interpolates_between_columns() {
        let data = [0u8, 100];
        let view = ImageView::from_slice(&data, 2, 1).unwrap();
        let out = resize_u8(view, 4, 1, Interpolation::Bilinear).unwrap();
        assert_eq!(out.data(), &[0, 25, 75, 100]);
    }

    #[test]
    fn nearest_downscale_picks_top_left_samples() {
        let data: Vec<u8> = (0u8..16).collect();
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let out = resize_u8(view, 2, 2, Interpolation::Nearest).unwrap();
        assert_eq!(out.data(), &[0, 2, 8, 10]);
    }

    #[test]
    fn constant_image_stays_constant() {
        let data = vec![77u8; 7 * 3];
        let view = ImageView::from_slice(&data, 7, 3).unwrap();
        let out = resize_u8(view, 31, 9, Interpolation::Bilinear).unwrap();
        assert!(out.data().iter().all(|&v| v == 77));
    }
}
