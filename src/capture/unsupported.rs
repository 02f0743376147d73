//! Stand-in source for platforms without a capture backend.

use image::RgbaImage;

use super::stream::{DisplaySource, DisplayStream};
use crate::error::CaptureError;

#[derive(Clone, Debug, Default)]
pub struct UnsupportedSource;

impl UnsupportedSource {
    pub fn new() -> Self {
        Self
    }
}

/// Never constructed.
pub enum NoStream {}

impl DisplaySource for UnsupportedSource {
    type Stream = NoStream;

    fn open(&self) -> Result<NoStream, CaptureError> {
        Err(CaptureError::Unsupported(
            "no capture backend for this platform (build with the `xcap` feature)",
        ))
    }
}

impl DisplayStream for NoStream {
    fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        match *self {}
    }

    fn stop(&mut self) {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reports_unsupported() {
        assert!(matches!(
            UnsupportedSource::new().open(),
            Err(CaptureError::Unsupported(_))
        ));
    }
}
