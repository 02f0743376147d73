//! Error types for board-snap.

use std::time::Duration;
use thiserror::Error;

/// Failures while grabbing a frame from the display.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Screen capture was denied or is not permitted")]
    Denied,

    #[error("Captured frame could not be decoded: {0}")]
    Decode(String),

    #[error("Screen capture is not supported: {0}")]
    Unsupported(&'static str),

    #[error("No frame arrived within {0:?}")]
    Timeout(Duration),

    #[error("Capture backend error: {0}")]
    Backend(String),
}

/// Failures while partitioning a crop into cells.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("Selection of {width}x{height} is too small for {cols} columns")]
    DegenerateSelection { width: u32, height: u32, cols: u32 },

    #[error("Cell at row {row}, column {col} has no pixels")]
    EmptyCell { row: usize, col: usize },
}

/// Top-level error for the capture → select → classify flow.
#[derive(Error, Debug)]
pub enum SnapError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for board-snap operations.
pub type Result<T> = std::result::Result<T, SnapError>;
