//! Candidate region detection.
//!
//! The detector itself is an external capability: anything that turns a
//! grayscale frame into axis-aligned rectangles can implement
//! [`RegionDetector`]. The OpenCV Haar cascade backend lives in
//! `crate::cv` behind the `opencv` feature.

use crate::util::{PlateMatchError, PlateMatchResult};
use crate::ImageView;

/// Axis-aligned rectangle in frame pixel coordinates.
///
/// Sizes are signed so that degenerate detector output can be represented
/// and rejected instead of silently wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true when the width or height is not positive.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Crops `image` to this rectangle as a zero-copy view.
    ///
    /// Fails with `InvalidRegion` when the rectangle is degenerate or does not
    /// lie entirely inside the image.
    pub fn crop<'a>(&self, image: ImageView<'a, u8>) -> PlateMatchResult<ImageView<'a, u8>> {
        if self.is_degenerate() || self.x < 0 || self.y < 0 {
            return Err(self.invalid());
        }
        image
            .roi(
                self.x as usize,
                self.y as usize,
                self.width as usize,
                self.height as usize,
            )
            .map_err(|_| self.invalid())
    }

    fn invalid(&self) -> PlateMatchError {
        PlateMatchError::InvalidRegion {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Multi-scale detection parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorParams {
    /// Scale step between pyramid levels; must be greater than 1.
    pub scale_factor: f64,
    /// Minimum neighbouring hits needed to keep a detection. Higher values
    /// reduce false positives at the cost of misses.
    pub min_neighbors: u32,
    /// Smallest object size considered, `(width, height)`; `(0, 0)` means no limit.
    pub min_size: (u32, u32),
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 5,
            min_size: (0, 0),
        }
    }
}

/// Produces candidate plate regions for a grayscale frame.
pub trait RegionDetector {
    /// Returns candidate rectangles in detector order.
    fn detect(
        &mut self,
        gray: ImageView<'_, u8>,
        params: &DetectorParams,
    ) -> PlateMatchResult<Vec<Rect>>;
}

impl<D: RegionDetector + ?Sized> RegionDetector for Box<D> {
    fn detect(
        &mut self,
        gray: ImageView<'_, u8>,
        params: &DetectorParams,
    ) -> PlateMatchResult<Vec<Rect>> {
        (**self).detect(gray, params)
    }
}

impl<D: RegionDetector + ?Sized> RegionDetector for &mut D {
    fn detect(
        &mut self,
        gray: ImageView<'_, u8>,
        params: &DetectorParams,
    ) -> PlateMatchResult<Vec<Rect>> {
        (**self).detect(gray, params)
    }
}

/// Detector that returns the same rectangles for every frame.
#[derive(Clone, Debug, Default)]
pub struct FixedRegions {
    regions: Vec<Rect>,
}

impl FixedRegions {
    /// Creates a detector yielding `regions` in the given order.
    pub fn new(regions: Vec<Rect>) -> Self {
        Self { regions }
    }
}

impl RegionDetector for FixedRegions {
    fn detect(
        &mut self,
        _gray: ImageView<'_, u8>,
        _params: &DetectorParams,
    ) -> PlateMatchResult<Vec<Rect>> {
        Ok(self.regions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;
    use crate::util::PlateMatchError;
    use crate::ImageView;

    #[test]
    fn crop_rejects_degenerate_and_outside_rects() {
        let data = vec![0u8; 20];
        let view = ImageView::from_slice(&data, 5, 4).unwrap();
        for rect in [
            Rect::new(0, 0, 0, 2),
            Rect::new(0, 0, 2, -1),
            Rect::new(-1, 0, 2, 2),
            Rect::new(4, 3, 2, 2),
        ] {
            assert_eq!(
                rect.crop(view).unwrap_err(),
                PlateMatchError::InvalidRegion {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                }
            );
        }
        let roi = Rect::new(3, 2, 2, 2).crop(view).unwrap();
        assert_eq!((roi.width(), roi.height()), (2, 2));
    }
}
