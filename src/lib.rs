//! PlateMatch identifies known license plates in images and video.
//!
//! Candidate plate regions come from a [`RegionDetector`] (an OpenCV Haar
//! cascade with the `opencv` feature). Each region is compared against a
//! [`Gallery`] of labeled grayscale templates with normalized
//! squared-difference matching; the best template is accepted when its score
//! is below a threshold.

pub mod config;
#[cfg(feature = "opencv")]
pub mod cv;
pub mod detect;
pub mod frame;
pub mod gallery;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod overlay;
pub mod pipeline;
#[cfg(feature = "render")]
pub mod render;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use config::{Color, OverlayStyle, PipelineConfig, UNMATCHED_LABEL};
pub use detect::{DetectorParams, FixedRegions, Rect, RegionDetector};
pub use frame::Frame;
pub use gallery::{Gallery, GalleryOrder};
pub use crate::image::{ImageView, OwnedImage};
pub use overlay::{draw_instructions, DrawInstruction};
pub use pipeline::{MatchResult, Pipeline, RunSummary};
pub use search::{
    resolve, resolve_region, BestMatch, DecisionPolicy, Outcome, DEFAULT_MATCH_THRESHOLD,
};
pub use template::{Interpolation, Template};
pub use util::{PlateMatchError, PlateMatchResult};

#[cfg(feature = "image-io")]
pub use gallery::load_gallery_dir;
#[cfg(feature = "image-io")]
pub use crate::image::io;
#[cfg(feature = "render")]
pub use render::Annotator;
