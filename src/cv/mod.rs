//! OpenCV-backed collaborators: Haar cascade detection, video decoding and
//! window display.
//!
//! Available when the `opencv` feature is enabled.

mod cascade;
mod convert;
mod video;
mod window;

pub use cascade::CascadeDetector;
pub use convert::{frame_from_bgr_mat, gray_to_mat, rgb_to_bgr_mat};
pub use video::VideoSource;
pub use window::Window;

use crate::util::PlateMatchError;

pub(crate) fn backend_error(context: &str, err: opencv::Error) -> PlateMatchError {
    PlateMatchError::Detector {
        reason: format!("{context}: {err}"),
    }
}
