//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::frame::{rgb_to_gray, Frame};
use crate::image::OwnedImage;
use crate::util::{PlateMatchError, PlateMatchResult};
use ::image::imageops::FilterType;
use ::image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &GrayImage) -> PlateMatchResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Converts an owned grayscale buffer back into an `image` buffer.
pub fn gray_image_from_owned(img: &OwnedImage) -> Option<GrayImage> {
    GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
}

/// Loads an image from disk and converts it to a grayscale owned image.
///
/// Color sources use the same BT.601 weights as [`Frame`], so a template
/// and a frame decoded from one file have identical gray planes.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> PlateMatchResult<OwnedImage> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|err| media_error(path, err))?;
    owned_from_dynamic(&img)
}

/// Converts a decoded image to grayscale.
pub fn owned_from_dynamic(img: &DynamicImage) -> PlateMatchResult<OwnedImage> {
    if let DynamicImage::ImageLuma8(gray) = img {
        return owned_from_gray_image(gray);
    }
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    OwnedImage::new(rgb_to_gray(rgb.as_raw()), width, height)
}

/// Loads a still image as a [`Frame`], optionally rescaled to `target_width`
/// with the aspect ratio preserved.
pub fn load_frame<P: AsRef<Path>>(path: P, target_width: Option<u32>) -> PlateMatchResult<Frame> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|err| media_error(path, err))?;
    let img = match target_width {
        Some(width) => resize_to_width(&img, width),
        None => img,
    };
    Frame::from_dynamic(&img)
}

/// Rescales an image to exactly `width` pixels wide, keeping the aspect ratio.
pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    if width == 0 || img.width() == width || img.width() == 0 {
        return img.clone();
    }
    let ratio = width as f64 / img.width() as f64;
    let height = ((img.height() as f64 * ratio).round() as u32).max(1);
    img.resize_exact(width, height, FilterType::Triangle)
}

impl Frame {
    /// Builds a frame from any decoded image.
    pub fn from_dynamic(img: &DynamicImage) -> PlateMatchResult<Self> {
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        Frame::from_rgb(rgb.into_raw(), width, height)
    }

    /// Copies the color plane into an `image` RGB buffer.
    pub fn to_rgb_image(&self) -> PlateMatchResult<RgbImage> {
        RgbImage::from_raw(self.width() as u32, self.height() as u32, self.rgb().to_vec())
            .ok_or(PlateMatchError::BufferTooSmall {
                needed: self.width() * self.height() * 3,
                got: self.rgb().len(),
            })
    }
}

pub(crate) fn media_error(path: &Path, err: impl std::fmt::Display) -> PlateMatchError {
    PlateMatchError::MediaRead {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{gray_image_from_owned, owned_from_dynamic, owned_from_gray_image, resize_to_width};
    use ::image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn resize_to_width_keeps_aspect_ratio() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(400, 100));
        let resized = resize_to_width(&img, 1000);
        assert_eq!(resized.width(), 1000);
        assert_eq!(resized.height(), 250);
    }

    #[test]
    fn gray_roundtrip_preserves_pixels() {
        let img = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y) as u8]));
        let owned = owned_from_gray_image(&img).unwrap();
        assert_eq!(owned.width(), 5);
        assert_eq!(gray_image_from_owned(&owned).unwrap(), img);
    }

    #[test]
    fn color_sources_use_frame_weights() {
        let rgb = RgbImage::from_fn(4, 2, |x, y| Rgb([(x * 60) as u8, (y * 90) as u8, 200]));
        let gray = owned_from_dynamic(&DynamicImage::ImageRgb8(rgb.clone())).unwrap();
        let frame = crate::Frame::from_dynamic(&DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(gray.view().as_slice(), frame.gray().as_slice());
        // (255*4899 + 8192) >> 14; Rec.709 weights would give 54.
        let red = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
        let red = owned_from_dynamic(&DynamicImage::ImageRgb8(red)).unwrap();
        assert_eq!(red.data(), &[76]);
    }
}
