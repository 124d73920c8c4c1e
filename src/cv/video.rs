//! Frame source decoding a video file.

use crate::cv::frame_from_bgr_mat;
use crate::frame::Frame;
use crate::util::{PlateMatchError, PlateMatchResult};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::{imgproc, videoio};
use std::path::Path;

/// Iterator over the frames of a video, optionally rescaled to a fixed width.
///
/// Yields `Err(MediaRead)` once if a frame cannot be decoded and then stops.
pub struct VideoSource {
    capture: videoio::VideoCapture,
    path: String,
    target_width: Option<u32>,
    finished: bool,
}

impl VideoSource {
    /// Opens a video file.
    pub fn open<P: AsRef<Path>>(path: P, target_width: Option<u32>) -> PlateMatchResult<Self> {
        let path = path.as_ref().display().to_string();
        let media_error = |reason: String| PlateMatchError::MediaRead {
            path: path.clone(),
            reason,
        };
        let capture = videoio::VideoCapture::from_file(&path, videoio::CAP_ANY)
            .map_err(|err| media_error(err.to_string()))?;
        if !capture
            .is_opened()
            .map_err(|err| media_error(err.to_string()))?
        {
            return Err(media_error("cannot open video".to_string()));
        }
        Ok(Self {
            capture,
            path,
            target_width,
            finished: false,
        })
    }

    fn read_frame(&mut self) -> PlateMatchResult<Option<Frame>> {
        let mut mat = Mat::default();
        let grabbed = self
            .capture
            .read(&mut mat)
            .map_err(|err| self.media_error(err))?;
        if !grabbed || mat.empty() {
            return Ok(None);
        }
        let mat = match self.target_width {
            Some(width) if width > 0 && mat.cols() != width as i32 => {
                let height = (mat.rows() as f64 * width as f64 / mat.cols() as f64).round() as i32;
                let mut resized = Mat::default();
                imgproc::resize(
                    &mat,
                    &mut resized,
                    Size::new(width as i32, height.max(1)),
                    0.0,
                    0.0,
                    imgproc::INTER_AREA,
                )
                .map_err(|err| self.media_error(err))?;
                resized
            }
            _ => mat,
        };
        frame_from_bgr_mat(&mat).map(Some)
    }

    fn media_error(&self, err: opencv::Error) -> PlateMatchError {
        PlateMatchError::MediaRead {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}

impl Iterator for VideoSource {
    type Item = PlateMatchResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
