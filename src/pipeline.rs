//! Per-frame detection and matching.
//!
//! Each frame is processed independently: detect candidate regions, resolve
//! each against the gallery, apply the decision policy. Nothing is carried
//! between frames.

use crate::config::PipelineConfig;
use crate::detect::{Rect, RegionDetector};
use crate::frame::Frame;
use crate::gallery::Gallery;
use crate::search::{resolve_region, DecisionPolicy, Outcome};
use crate::template::Interpolation;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{PlateMatchError, PlateMatchResult};
use crate::ImageView;
use std::ops::ControlFlow;

/// Classification of one candidate region.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Detected region in frame coordinates.
    pub region: Rect,
    /// Accept/reject decision for the region.
    pub outcome: Outcome,
}

/// Counters accumulated by [`Pipeline::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames fully processed.
    pub frames: usize,
    /// Match results produced across all frames.
    pub regions: usize,
    /// Results classified as matched.
    pub matched: usize,
}

/// Classifies already-detected regions of a grayscale frame.
///
/// Results follow the order of `regions`. Rectangles that are degenerate or
/// fall outside the frame are skipped; any other failure aborts the frame.
pub fn classify_regions(
    gray: ImageView<'_, u8>,
    regions: &[Rect],
    gallery: &Gallery,
    policy: &DecisionPolicy,
    interpolation: Interpolation,
) -> PlateMatchResult<Vec<MatchResult>> {
    let mut results = Vec::with_capacity(regions.len());
    for &region in regions {
        let best = match resolve_region(gray, region, gallery, interpolation) {
            Ok(best) => best,
            Err(PlateMatchError::InvalidRegion { .. }) => {
                trace_warn!(
                    "region_skipped",
                    x = region.x,
                    y = region.y,
                    width = region.width,
                    height = region.height
                );
                continue;
            }
            Err(err) => return Err(err),
        };
        let outcome = policy.decide(&best);
        if let Outcome::Matched { label, score } = &outcome {
            trace_event!("plate_matched", label = label.as_str(), score = *score);
        } else {
            trace_event!("plate_unmatched", best_score = best.score);
        }
        results.push(MatchResult { region, outcome });
    }
    Ok(results)
}

/// Detection-and-matching pipeline over a fixed gallery.
pub struct Pipeline<D> {
    gallery: Gallery,
    detector: D,
    config: PipelineConfig,
    policy: DecisionPolicy,
}

impl<D: RegionDetector> Pipeline<D> {
    /// Creates a pipeline; fails on invalid configuration or an empty gallery.
    pub fn new(gallery: Gallery, detector: D, config: PipelineConfig) -> PlateMatchResult<Self> {
        config.validate()?;
        gallery.ensure_not_empty("gallery")?;
        let policy = config.policy()?;
        Ok(Self {
            gallery,
            detector,
            config,
            policy,
        })
    }

    /// Returns the reference gallery.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Detects and classifies plates in a grayscale frame.
    ///
    /// A frame without detections yields an empty list.
    pub fn process(&mut self, gray: ImageView<'_, u8>) -> PlateMatchResult<Vec<MatchResult>> {
        let _span = trace_span!("process_frame", width = gray.width(), height = gray.height())
            .entered();
        let regions = self.detector.detect(gray, &self.config.detector)?;
        trace_event!("regions_detected", count = regions.len());
        classify_regions(
            gray,
            &regions,
            &self.gallery,
            &self.policy,
            self.config.interpolation,
        )
    }

    /// Processes the grayscale plane of `frame`.
    pub fn process_frame(&mut self, frame: &Frame) -> PlateMatchResult<Vec<MatchResult>> {
        self.process(frame.gray())
    }

    /// Runs a read-process-sink loop over a frame stream.
    ///
    /// The sink sees every processed frame with its results and may return
    /// `ControlFlow::Break` to stop; the check happens only between frames.
    /// A frame read error ends the loop and is returned.
    pub fn run<I, F>(&mut self, frames: I, mut sink: F) -> PlateMatchResult<RunSummary>
    where
        I: IntoIterator<Item = PlateMatchResult<Frame>>,
        F: FnMut(&Frame, &[MatchResult]) -> PlateMatchResult<ControlFlow<()>>,
    {
        let mut summary = RunSummary::default();
        for frame in frames {
            let frame = frame?;
            let results = self.process_frame(&frame)?;
            summary.frames += 1;
            summary.regions += results.len();
            summary.matched += results.iter().filter(|r| r.outcome.is_matched()).count();
            if sink(&frame, &results)?.is_break() {
                break;
            }
        }
        trace_event!(
            "run_finished",
            frames = summary.frames,
            regions = summary.regions,
            matched = summary.matched
        );
        Ok(summary)
    }
}
