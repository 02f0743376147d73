//! One-shot display capture.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::frame::{jpeg_round_trip, scale_to_fit, Frame, Viewport};
use super::stream::{DisplaySource, StreamGuard};
use crate::error::CaptureError;

/// How a frame is post-processed after it is grabbed.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureOptions {
    /// Quality of the intermediate JPEG round-trip; `None` skips it.
    pub jpeg_quality: Option<u8>,
    /// Wait before opening the stream.
    pub capture_delay: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: Some(95),
            capture_delay: Duration::ZERO,
        }
    }
}

/// Grabs exactly one frame from a display source.
pub struct DisplayCaptureSession<S: DisplaySource> {
    source: S,
    options: CaptureOptions,
}

impl<S: DisplaySource> DisplayCaptureSession<S> {
    pub fn new(source: S, options: CaptureOptions) -> Self {
        Self { source, options }
    }

    /// Opens the stream, reads the first frame, stops the stream, and returns
    /// the frame scaled to fit `viewport`.
    ///
    /// The stream is stopped exactly once whether or not the read succeeds.
    pub fn capture_frame(&self, viewport: Viewport) -> Result<Frame, CaptureError> {
        if !self.options.capture_delay.is_zero() {
            debug!("Waiting {:?} before capture", self.options.capture_delay);
            thread::sleep(self.options.capture_delay);
        }

        let start = Instant::now();
        let mut guard = StreamGuard::new(self.source.open()?);
        let raw = guard.next_frame()?;
        guard.stop();
        debug!(
            "Grabbed {}x{} frame in {:?}",
            raw.width(),
            raw.height(),
            start.elapsed()
        );

        let decoded = match self.options.jpeg_quality {
            Some(quality) => jpeg_round_trip(&raw, quality)?,
            None => raw,
        };
        let scaled = scale_to_fit(decoded, viewport);

        info!("Captured frame {}x{}", scaled.width(), scaled.height());
        Ok(Frame::new(scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::stream::DisplayStream;
    use image::{ImageBuffer, Rgba, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Copy)]
    enum Behavior {
        Frame,
        FailOpen,
        FailRead,
    }

    struct FakeSource {
        behavior: Behavior,
        stops: Arc<AtomicUsize>,
    }

    struct FakeStream {
        behavior: Behavior,
        stops: Arc<AtomicUsize>,
    }

    impl DisplayStream for FakeStream {
        fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
            match self.behavior {
                Behavior::FailRead => Err(CaptureError::Timeout(Duration::from_secs(5))),
                _ => Ok(ImageBuffer::from_pixel(400, 200, Rgba([10, 20, 30, 255]))),
            }
        }

        fn stop(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl DisplaySource for FakeSource {
        type Stream = FakeStream;

        fn open(&self) -> Result<FakeStream, CaptureError> {
            match self.behavior {
                Behavior::FailOpen => Err(CaptureError::Denied),
                behavior => Ok(FakeStream {
                    behavior,
                    stops: Arc::clone(&self.stops),
                }),
            }
        }
    }

    fn session(behavior: Behavior, options: CaptureOptions) -> (DisplayCaptureSession<FakeSource>, Arc<AtomicUsize>) {
        let stops = Arc::new(AtomicUsize::new(0));
        let source = FakeSource {
            behavior,
            stops: Arc::clone(&stops),
        };
        (DisplayCaptureSession::new(source, options), stops)
    }

    #[test]
    fn test_capture_stops_stream_once() {
        let (session, stops) = session(Behavior::Frame, CaptureOptions::default());
        let frame = session.capture_frame(Viewport::default()).unwrap();
        assert_eq!((frame.width(), frame.height()), (400, 200));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_read_still_stops_stream() {
        let (session, stops) = session(Behavior::FailRead, CaptureOptions::default());
        let result = session.capture_frame(Viewport::default());
        assert!(matches!(result, Err(CaptureError::Timeout(_))));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_denied_open_has_nothing_to_stop() {
        let (session, stops) = session(Behavior::FailOpen, CaptureOptions::default());
        assert!(matches!(
            session.capture_frame(Viewport::default()),
            Err(CaptureError::Denied)
        ));
        assert_eq!(stops.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_frame_scaled_to_viewport() {
        let options = CaptureOptions {
            jpeg_quality: None,
            ..CaptureOptions::default()
        };
        let (session, _) = session(Behavior::Frame, options);
        let frame = session.capture_frame(Viewport::new(100, 100)).unwrap();
        assert_eq!((frame.width(), frame.height()), (100, 50));
        assert_eq!(*frame.image().get_pixel(50, 25), Rgba([10, 20, 30, 255]));
    }
}
