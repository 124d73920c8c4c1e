//! Error types for platematch.

use thiserror::Error;

/// Result alias for platematch operations.
pub type PlateMatchResult<T> = std::result::Result<T, PlateMatchError>;

/// Errors that can occur while loading references, detecting, or matching.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlateMatchError {
    /// Image width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions: width={width} height={height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride: width={width} stride={stride}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the described image.
    #[error("buffer too small: needed={needed} got={got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside its image.
    #[error(
        "roi out of bounds: x={x} y={y} width={width} height={height} \
         (image {img_width}x{img_height})"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A candidate region is degenerate or lies outside the frame.
    #[error("invalid region: x={x} y={y} width={width} height={height}")]
    InvalidRegion {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// No templates were found for the reference gallery.
    #[error("no templates found in '{source_name}'")]
    GalleryEmpty { source_name: String },
    /// The serialized detector could not be found or loaded.
    #[error("classifier file not found: '{path}'")]
    ClassifierMissing { path: String },
    /// An image, video, or frame could not be read or decoded.
    #[error("failed to read '{path}': {reason}")]
    MediaRead { path: String, reason: String },
    /// The region detector backend reported a failure.
    #[error("detector failure: {reason}")]
    Detector { reason: String },
    /// The overlay font could not be loaded.
    #[error("font error: {reason}")]
    Font { reason: String },
    /// The pipeline configuration is invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
