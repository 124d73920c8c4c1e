//! Labeled reference templates and their scoring plans.

use crate::image::{ImageView, OwnedImage};
use crate::util::PlateMatchResult;

mod plan;
pub mod resize;

pub use plan::SqDiffPlan;
pub use resize::{resize_u8, Interpolation};

/// A known plate: a label and its grayscale reference image.
///
/// Templates are immutable once built; resizing for a region produces a new
/// buffer and leaves the template untouched.
#[derive(Clone, Debug)]
pub struct Template {
    label: String,
    img: OwnedImage,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(
        label: impl Into<String>,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> PlateMatchResult<Self> {
        let img = OwnedImage::new(data, width, height)?;
        Ok(Self::from_image(label, img))
    }

    /// Creates a template from an owned grayscale image.
    pub fn from_image(label: impl Into<String>, img: OwnedImage) -> Self {
        Self {
            label: label.into(),
            img,
        }
    }

    /// Returns the plate label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the native template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the native template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Resizes the template image to `width x height`.
    pub fn resized(
        &self,
        width: usize,
        height: usize,
        interpolation: Interpolation,
    ) -> PlateMatchResult<OwnedImage> {
        resize_u8(self.view(), width, height, interpolation)
    }
}
