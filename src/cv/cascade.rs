//! Haar cascade region detector.

use crate::cv::{backend_error, gray_to_mat};
use crate::detect::{DetectorParams, Rect, RegionDetector};
use crate::trace::trace_event;
use crate::util::{PlateMatchError, PlateMatchResult};
use crate::ImageView;
use opencv::core::{Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use std::path::Path;

/// Region detector backed by a serialized OpenCV cascade classifier.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
}

impl CascadeDetector {
    /// Loads a cascade from disk.
    ///
    /// Fails with `ClassifierMissing` when the file does not exist or cannot
    /// be parsed as a cascade.
    pub fn open<P: AsRef<Path>>(path: P) -> PlateMatchResult<Self> {
        let path = path.as_ref();
        let missing = || PlateMatchError::ClassifierMissing {
            path: path.display().to_string(),
        };
        if !path.is_file() {
            return Err(missing());
        }
        let path_str = path.to_str().ok_or_else(missing)?;
        let classifier = CascadeClassifier::new(path_str).map_err(|_| missing())?;
        if classifier.empty().map_err(|_| missing())? {
            return Err(missing());
        }
        trace_event!("classifier_loaded", path = path_str);
        Ok(Self { classifier })
    }
}

impl RegionDetector for CascadeDetector {
    fn detect(
        &mut self,
        gray: ImageView<'_, u8>,
        params: &DetectorParams,
    ) -> PlateMatchResult<Vec<Rect>> {
        let mat = gray_to_mat(gray)?;
        let mut objects = Vector::<opencv::core::Rect>::new();
        let (min_w, min_h) = params.min_size;
        self.classifier
            .detect_multi_scale(
                &mat,
                &mut objects,
                params.scale_factor,
                params.min_neighbors as i32,
                0,
                Size::new(min_w as i32, min_h as i32),
                Size::default(),
            )
            .map_err(|err| backend_error("detect_multi_scale", err))?;
        Ok(objects
            .iter()
            .map(|r| Rect::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
