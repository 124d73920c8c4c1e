//! Draw instructions derived from match results.
//!
//! Instructions are plain data so that any renderer (the `render` feature,
//! an OpenCV window, a test) can consume them. A frame with no results
//! produces no instructions.

use crate::config::{Color, OverlayStyle};
use crate::detect::Rect;
use crate::pipeline::MatchResult;
use crate::search::Outcome;

/// How to annotate one region.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawInstruction {
    /// Region to fill and outline.
    pub rect: Rect,
    /// Color of both the translucent fill and the opaque outline.
    pub color: Color,
    /// Fill opacity.
    pub alpha: f32,
    /// Outline thickness in pixels.
    pub thickness: u32,
    /// Text drawn above the region.
    pub label: String,
    /// Text color.
    pub text_color: Color,
    /// Text scale.
    pub font_scale: f32,
    /// Distance from the text baseline to the region's top edge.
    pub label_offset: i32,
}

impl DrawInstruction {
    /// Builds the instruction for a single result.
    pub fn for_result(result: &MatchResult, style: &OverlayStyle) -> Self {
        let (color, label) = match &result.outcome {
            Outcome::Matched { label, .. } => (style.matched_color, label.clone()),
            Outcome::Unmatched => (style.unmatched_color, style.unmatched_label.clone()),
        };
        Self {
            rect: result.region,
            color,
            alpha: style.overlay_alpha,
            thickness: style.line_thickness,
            label,
            text_color: style.text_color,
            font_scale: style.font_scale,
            label_offset: style.label_offset,
        }
    }

    /// Returns the left end of the text baseline for text `text_width` wide,
    /// centered horizontally on the region.
    pub fn label_origin(&self, text_width: i32) -> (i32, i32) {
        let x = self.rect.x + (self.rect.width - text_width).div_euclid(2);
        (x, self.rect.y - self.label_offset)
    }
}

/// Builds one instruction per result, in result order.
pub fn draw_instructions(results: &[MatchResult], style: &OverlayStyle) -> Vec<DrawInstruction> {
    results
        .iter()
        .map(|result| DrawInstruction::for_result(result, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{draw_instructions, DrawInstruction};
    use crate::config::{OverlayStyle, UNMATCHED_LABEL};
    use crate::detect::Rect;
    use crate::pipeline::MatchResult;
    use crate::search::Outcome;

    #[test]
    fn unmatched_uses_literal_label_and_red() {
        let style = OverlayStyle::default();
        let result = MatchResult {
            region: Rect::new(10, 40, 100, 30),
            outcome: Outcome::Unmatched,
        };
        let instr = DrawInstruction::for_result(&result, &style);
        assert_eq!(instr.label, UNMATCHED_LABEL);
        assert_eq!(instr.color, style.unmatched_color);
        assert_eq!(instr.alpha, 0.5);
    }

    #[test]
    fn label_is_centered_above_region() {
        let style = OverlayStyle::default();
        let result = MatchResult {
            region: Rect::new(10, 40, 100, 30),
            outcome: Outcome::Matched {
                label: "ABC123".to_string(),
                score: 0.1,
            },
        };
        let instr = DrawInstruction::for_result(&result, &style);
        assert_eq!(instr.color, style.matched_color);
        assert_eq!(instr.label_origin(40), (40, 30));
        // Wider text than the region floors toward the left, like Python `//`.
        assert_eq!(instr.label_origin(105), (7, 30));
    }

    #[test]
    fn no_results_no_instructions() {
        assert!(draw_instructions(&[], &OverlayStyle::default()).is_empty());
    }
}
