//! One-shot capture of the visible display.
//!
//! This module provides:
//! - The `DisplaySource`/`DisplayStream` seam and the `StreamGuard` that
//!   stops a stream exactly once
//! - `DisplayCaptureSession::capture_frame`, which grabs, decodes and scales
//!   a single frame
//! - The platform backend picked at compile time (`PlatformSource`)

pub mod frame;
pub mod session;
pub mod stream;
pub mod unsupported;

#[cfg(windows)]
pub mod wgc;

#[cfg(all(not(windows), feature = "xcap"))]
pub mod portable;

pub use frame::{jpeg_round_trip, scale_to_fit, Frame, Viewport};
pub use session::{CaptureOptions, DisplayCaptureSession};
pub use stream::{DisplaySource, DisplayStream, StreamGuard};

use crate::config::CaptureConfig;

#[cfg(windows)]
pub type PlatformSource = wgc::GraphicsCaptureSource;

#[cfg(all(not(windows), feature = "xcap"))]
pub type PlatformSource = portable::XcapSource;

#[cfg(all(not(windows), not(feature = "xcap")))]
pub type PlatformSource = unsupported::UnsupportedSource;

/// Builds the capture source for this platform.
pub fn platform_source(config: &CaptureConfig) -> PlatformSource {
    #[cfg(windows)]
    {
        wgc::GraphicsCaptureSource::new(config.frame_timeout())
    }
    #[cfg(all(not(windows), feature = "xcap"))]
    {
        let _ = config;
        portable::XcapSource::new()
    }
    #[cfg(all(not(windows), not(feature = "xcap")))]
    {
        let _ = config;
        unsupported::UnsupportedSource::new()
    }
}

/// Capture session on the platform source, configured from `config`.
pub fn platform_session(config: &CaptureConfig) -> DisplayCaptureSession<PlatformSource> {
    DisplayCaptureSession::new(platform_source(config), config.options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "needs a real display and capture permission"]
    fn test_platform_capture_primary_display() {
        let session = platform_session(&CaptureConfig::default());
        let frame = session.capture_frame(Viewport::new(1280, 720)).unwrap();
        assert!(frame.width() > 0 && frame.width() <= 1280);
        assert!(frame.height() > 0 && frame.height() <= 720);
    }
}
