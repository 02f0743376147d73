//! Primary-monitor capture through xcap.

use image::RgbaImage;
use tracing::debug;
use xcap::Monitor;

use super::stream::{DisplaySource, DisplayStream};
use crate::error::CaptureError;

/// Opens screenshots of the primary monitor.
#[derive(Clone, Debug, Default)]
pub struct XcapSource;

impl XcapSource {
    pub fn new() -> Self {
        Self
    }
}

/// The selected monitor. Each frame is a fresh screenshot.
pub struct XcapStream {
    monitor: Monitor,
}

impl DisplaySource for XcapSource {
    type Stream = XcapStream;

    fn open(&self) -> Result<XcapStream, CaptureError> {
        let monitors = Monitor::all()
            .map_err(|e| CaptureError::Backend(format!("failed to list monitors: {e}")))?;

        let monitor = monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())
            .cloned()
            .ok_or_else(|| CaptureError::Backend("no monitor found".to_string()))?;

        debug!("Opened capture on monitor {:?}", monitor.name());
        Ok(XcapStream { monitor })
    }
}

impl DisplayStream for XcapStream {
    fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        let image = self
            .monitor
            .capture_image()
            .map_err(|e| CaptureError::Backend(format!("screen capture failed: {e}")))?;

        // macOS returns an empty image when screen recording is not allowed.
        if image.width() == 0 || image.height() == 0 {
            return Err(CaptureError::Denied);
        }
        Ok(image)
    }

    fn stop(&mut self) {}
}
