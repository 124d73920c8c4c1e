//! Threshold-based accept/reject policy.

use crate::search::BestMatch;
use crate::util::{PlateMatchError, PlateMatchResult};

/// Default acceptance threshold for normalized squared difference.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.5;

/// Classification of a candidate region.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The region matches a known plate.
    Matched { label: String, score: f32 },
    /// No template scored below the threshold.
    Unmatched,
}

impl Outcome {
    /// Returns true for [`Outcome::Matched`].
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched { .. })
    }

    /// Returns the matched label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Outcome::Matched { label, .. } => Some(label),
            Outcome::Unmatched => None,
        }
    }
}

/// Accepts a best match only when its score is strictly below `threshold`.
///
/// Lowering the threshold makes matching stricter (fewer false matches, more
/// misses); raising it makes matching looser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionPolicy {
    threshold: f32,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl DecisionPolicy {
    /// Creates a policy with a finite threshold.
    pub fn new(threshold: f32) -> PlateMatchResult<Self> {
        if !threshold.is_finite() {
            return Err(PlateMatchError::InvalidConfig("match threshold must be finite"));
        }
        Ok(Self { threshold })
    }

    /// Returns the acceptance threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Classifies a best match.
    pub fn decide(&self, best: &BestMatch) -> Outcome {
        match &best.label {
            Some(label) if best.score < self.threshold => Outcome::Matched {
                label: label.clone(),
                score: best.score,
            },
            _ => Outcome::Unmatched,
        }
    }
}
