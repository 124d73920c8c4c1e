//! Conversions between platematch buffers and OpenCV matrices.

use crate::cv::backend_error;
use crate::frame::Frame;
use crate::util::{PlateMatchError, PlateMatchResult};
use crate::ImageView;
use opencv::core::{Mat, Vec3b, VecN};
use opencv::prelude::*;

/// Copies a grayscale view into a single-channel `CV_8U` matrix.
pub fn gray_to_mat(gray: ImageView<'_, u8>) -> PlateMatchResult<Mat> {
    let mut data = Vec::with_capacity(gray.width() * gray.height());
    for row in gray.rows() {
        data.extend_from_slice(row);
    }
    let mat = Mat::new_rows_cols_with_data(gray.height() as i32, gray.width() as i32, &data)
        .map_err(|err| backend_error("gray matrix", err))?;
    mat.try_clone().map_err(|err| backend_error("gray matrix", err))
}

/// Copies interleaved RGB bytes into a three-channel BGR matrix.
pub fn rgb_to_bgr_mat(rgb: &[u8], width: usize, height: usize) -> PlateMatchResult<Mat> {
    let pixels: Vec<Vec3b> = rgb
        .chunks_exact(3)
        .map(|px| VecN([px[2], px[1], px[0]]))
        .collect();
    if pixels.len() != width * height {
        return Err(PlateMatchError::BufferTooSmall {
            needed: width * height * 3,
            got: rgb.len(),
        });
    }
    let mat = Mat::new_rows_cols_with_data(height as i32, width as i32, &pixels)
        .map_err(|err| backend_error("bgr matrix", err))?;
    mat.try_clone().map_err(|err| backend_error("bgr matrix", err))
}

/// Builds a [`Frame`] from an 8-bit three-channel BGR matrix.
pub fn frame_from_bgr_mat(mat: &Mat) -> PlateMatchResult<Frame> {
    if mat.channels() != 3 {
        return Err(PlateMatchError::Detector {
            reason: format!("expected a 3-channel frame, got {}", mat.channels()),
        });
    }
    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone().map_err(|err| backend_error("frame copy", err))?;
        &owned
    };
    let bytes = mat
        .data_bytes()
        .map_err(|err| backend_error("frame data", err))?;
    let rgb = bytes
        .chunks_exact(3)
        .flat_map(|px| [px[2], px[1], px[0]])
        .collect();
    Frame::from_rgb(rgb, mat.cols() as usize, mat.rows() as usize)
}
