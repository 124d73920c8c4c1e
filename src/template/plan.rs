//! Template plan precomputation for normalized squared-difference scoring.

use crate::image::ImageView;

/// Template pixels and energy (`sum(T^2)`) prepared for scoring.
pub struct SqDiffPlan {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
    energy: f64,
}

impl SqDiffPlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> Self {
        let mut pixels = Vec::with_capacity(tpl.width() * tpl.height());
        let mut energy = 0.0f64;
        for row in tpl.rows() {
            for &value in row {
                let v = value as f64;
                energy += v * v;
                pixels.push(value as f32);
            }
        }
        Self {
            width: tpl.width(),
            height: tpl.height(),
            pixels,
            energy,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the template pixels in row-major order.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Returns the sum of squared template intensities.
    pub fn energy(&self) -> f64 {
        self.energy
    }
}
