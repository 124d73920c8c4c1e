//! Pipeline and overlay configuration.

use crate::detect::DetectorParams;
use crate::search::{DecisionPolicy, DEFAULT_MATCH_THRESHOLD};
use crate::template::Interpolation;
use crate::util::{PlateMatchError, PlateMatchResult};
use std::path::PathBuf;

/// RGB color triple.
pub type Color = [u8; 3];

/// Label drawn over regions without an accepted match.
pub const UNMATCHED_LABEL: &str = "Matricula no encontrada";

/// Visual parameters for annotating match results.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Fill and outline color for matched regions.
    pub matched_color: Color,
    /// Fill and outline color for unmatched regions.
    pub unmatched_color: Color,
    /// Opacity of the filled rectangle (0 transparent, 1 opaque).
    pub overlay_alpha: f32,
    /// Label text color.
    pub text_color: Color,
    /// Outline thickness in pixels.
    pub line_thickness: u32,
    /// TrueType font used for labels; labels are skipped without one.
    pub font_path: Option<PathBuf>,
    /// Text scale relative to a 24 px base height.
    pub font_scale: f32,
    /// Distance in pixels between the label baseline and the region top.
    pub label_offset: i32,
    /// Text drawn for unmatched regions.
    pub unmatched_label: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            matched_color: [0, 255, 0],
            unmatched_color: [255, 0, 0],
            overlay_alpha: 0.5,
            text_color: [255, 255, 0],
            line_thickness: 2,
            font_path: None,
            font_scale: 1.0,
            label_offset: 10,
            unmatched_label: UNMATCHED_LABEL.to_string(),
        }
    }
}

/// Configuration passed into [`crate::Pipeline::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Best matches scoring at or above this value are rejected.
    pub match_threshold: f32,
    /// Parameters forwarded to the region detector.
    pub detector: DetectorParams,
    /// Sampling used to rescale templates to region size.
    pub interpolation: Interpolation,
    /// Overlay appearance.
    pub overlay: OverlayStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            detector: DetectorParams::default(),
            interpolation: Interpolation::default(),
            overlay: OverlayStyle::default(),
        }
    }
}

impl PipelineConfig {
    /// Checks value ranges.
    pub fn validate(&self) -> PlateMatchResult<()> {
        if !self.match_threshold.is_finite() {
            return Err(PlateMatchError::InvalidConfig("match_threshold must be finite"));
        }
        let scale_factor = self.detector.scale_factor;
        if scale_factor.is_nan() || scale_factor <= 1.0 {
            return Err(PlateMatchError::InvalidConfig(
                "detector scale_factor must be greater than 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.overlay.overlay_alpha) {
            return Err(PlateMatchError::InvalidConfig(
                "overlay_alpha must lie in [0, 1]",
            ));
        }
        if self.overlay.line_thickness == 0 {
            return Err(PlateMatchError::InvalidConfig("line_thickness must be at least 1"));
        }
        let font_scale = self.overlay.font_scale;
        if font_scale.is_nan() || font_scale <= 0.0 {
            return Err(PlateMatchError::InvalidConfig("font_scale must be positive"));
        }
        Ok(())
    }

    /// Builds the decision policy for `match_threshold`.
    pub fn policy(&self) -> PlateMatchResult<DecisionPolicy> {
        DecisionPolicy::new(self.match_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineConfig;
    use crate::util::PlateMatchError;

    #[test]
    fn defaults_are_valid() {
        let cfg = PipelineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.detector.min_neighbors, 5);
        assert_eq!(cfg.policy().unwrap().threshold(), 0.5);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut cfg = PipelineConfig::default();
        cfg.overlay.overlay_alpha = 1.5;
        assert_eq!(
            cfg.validate().unwrap_err(),
            PlateMatchError::InvalidConfig("overlay_alpha must lie in [0, 1]")
        );

        let mut cfg = PipelineConfig::default();
        cfg.detector.scale_factor = 1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::default();
        cfg.match_threshold = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}
