//! Frames carrying a color plane and its derived grayscale plane.

use crate::image::{ImageView, OwnedImage};
use crate::util::{PlateMatchError, PlateMatchResult};

/// A single still image or video frame.
///
/// The grayscale plane is derived once at construction with the BT.601
/// fixed-point weights used by OpenCV (`R*4899 + G*9617 + B*1868`, 14-bit
/// shift with rounding).
#[derive(Clone, Debug)]
pub struct Frame {
    rgb: Vec<u8>,
    gray: OwnedImage,
}

const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

impl Frame {
    /// Builds a frame from interleaved RGB bytes.
    pub fn from_rgb(rgb: Vec<u8>, width: usize, height: usize) -> PlateMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlateMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(3))
            .ok_or(PlateMatchError::InvalidDimensions { width, height })?;
        if rgb.len() != needed {
            return Err(PlateMatchError::BufferTooSmall {
                needed,
                got: rgb.len(),
            });
        }
        let gray = OwnedImage::new(rgb_to_gray(&rgb), width, height)?;
        Ok(Self { rgb, gray })
    }

    /// Builds a frame from a grayscale image; the color plane replicates it.
    pub fn from_gray(gray: OwnedImage) -> Self {
        let rgb = gray.data().iter().flat_map(|&v| [v, v, v]).collect();
        Self { rgb, gray }
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> usize {
        self.gray.width()
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> usize {
        self.gray.height()
    }

    /// Returns the interleaved RGB bytes.
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Returns the grayscale plane.
    pub fn gray(&self) -> ImageView<'_, u8> {
        self.gray.view()
    }
}

/// Converts interleaved RGB bytes to one gray byte per pixel.
pub(crate) fn rgb_to_gray(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = u32::from(r) * R_WEIGHT + u32::from(g) * G_WEIGHT + u32::from(b) * B_WEIGHT;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}
