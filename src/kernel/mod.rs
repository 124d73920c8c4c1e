//! Score kernels comparing a template plan against image windows.

use crate::template::SqDiffPlan;
use crate::util::PlateMatchResult;
use crate::ImageView;

pub mod scalar;

/// Dense map of scores, one per valid template placement.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreMap {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreMap {
    pub(crate) fn new(width: usize, height: usize, scores: Vec<f32>) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    /// Number of horizontal placements (`image_width - template_width + 1`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements (`image_height - template_height + 1`).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score for placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns the global minimum as `(x, y, score)`.
    ///
    /// The first minimum in row-major order wins on ties.
    pub fn min_loc(&self) -> Option<(usize, usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if best.map_or(true, |(_, b)| score < b) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, score)| (idx % self.width, idx / self.width, score))
    }
}

/// Kernel trait for scoring and scan operations.
///
/// Lower scores are better for difference metrics.
pub trait Kernel {
    type Plan;

    /// Computes the score at a single placement (top-left coordinates).
    fn score_at(image: ImageView<'_, u8>, plan: &Self::Plan, x: usize, y: usize) -> f32;

    /// Scores every valid placement of the template inside the image.
    fn scan_full(image: ImageView<'_, u8>, plan: &Self::Plan) -> PlateMatchResult<ScoreMap>;
}

/// Normalized squared-difference kernel over `u8` data.
pub type SqDiffNormed = scalar::SqDiffNormedScalar;

/// Convenience wrapper scoring every placement of `plan` in `image`.
pub fn scan_sqdiff_normed(
    image: ImageView<'_, u8>,
    plan: &SqDiffPlan,
) -> PlateMatchResult<ScoreMap> {
    <SqDiffNormed as Kernel>::scan_full(image, plan)
}

#[cfg(test)]
mod tests {
    use super::ScoreMap;

    #[test]
    fn min_loc_prefers_first_minimum() {
        let map = ScoreMap::new(3, 2, vec![0.5, 0.2, 0.9, 0.2, 0.7, 0.3]);
        assert_eq!(map.min_loc(), Some((1, 0, 0.2)));
        assert_eq!(map.get(0, 1), Some(0.2));
        assert_eq!(map.get(3, 0), None);
    }
}
