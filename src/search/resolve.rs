//! Best-of-N template scoring for a single region.

use crate::detect::Rect;
use crate::gallery::Gallery;
use crate::kernel::scan_sqdiff_normed;
use crate::template::{Interpolation, SqDiffPlan};
use crate::trace::{trace_event, trace_span};
use crate::util::PlateMatchResult;
use crate::ImageView;

/// Best template found for a region.
#[derive(Clone, Debug, PartialEq)]
pub struct BestMatch {
    /// Gallery index of the winning template, if any comparison was made.
    pub index: Option<usize>,
    /// Label of the winning template.
    pub label: Option<String>,
    /// Normalized squared difference of the winner (0 is a perfect match);
    /// `f32::INFINITY` when the gallery is empty.
    pub score: f32,
}

impl BestMatch {
    /// The "no comparison was possible" sentinel.
    pub fn none() -> Self {
        Self {
            index: None,
            label: None,
            score: f32::INFINITY,
        }
    }
}

/// Finds the gallery template that best matches `region`.
///
/// Every template is resized to the region's size, scored with the
/// normalized squared-difference kernel, and reduced to its map minimum.
/// A template replaces the current best only when strictly lower, so on
/// ties the earliest template in gallery order wins.
pub fn resolve(
    region: ImageView<'_, u8>,
    gallery: &Gallery,
    interpolation: Interpolation,
) -> PlateMatchResult<BestMatch> {
    let _span = trace_span!(
        "resolve",
        width = region.width(),
        height = region.height(),
        templates = gallery.len()
    )
    .entered();

    let mut best = BestMatch::none();
    for (index, template) in gallery.iter().enumerate() {
        let resized = template.resized(region.width(), region.height(), interpolation)?;
        let plan = SqDiffPlan::from_view(resized.view());
        let map = scan_sqdiff_normed(region, &plan)?;
        let Some((_, _, score)) = map.min_loc() else {
            continue;
        };
        if score < best.score {
            best = BestMatch {
                index: Some(index),
                label: Some(template.label().to_string()),
                score,
            };
        }
    }

    trace_event!("resolved", score = best.score, found = best.index.is_some());
    Ok(best)
}

/// Crops `rect` out of a grayscale frame and resolves it.
///
/// Fails with `InvalidRegion` when the rectangle is degenerate or falls
/// outside the frame.
pub fn resolve_region(
    gray: ImageView<'_, u8>,
    rect: Rect,
    gallery: &Gallery,
    interpolation: Interpolation,
) -> PlateMatchResult<BestMatch> {
    let region = rect.crop(gray)?;
    resolve(region, gallery, interpolation)
}
