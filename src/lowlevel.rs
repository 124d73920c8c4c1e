//! Low-level building blocks for custom matching pipelines.
//!
//! These expose the scoring kernel, template plans and resizing used by
//! [`crate::resolve`]. Most users should prefer [`crate::Pipeline`].

pub use crate::kernel::scalar::SqDiffNormedScalar;
pub use crate::kernel::{scan_sqdiff_normed, Kernel, ScoreMap};
pub use crate::pipeline::classify_regions;
pub use crate::template::{resize_u8, Interpolation, SqDiffPlan};
