//! Display streams and their scoped release.

use image::RgbaImage;
use tracing::debug;

use crate::error::CaptureError;

/// An open capture stream on a display.
pub trait DisplayStream {
    /// Blocks until the next frame is available and returns it as RGBA.
    fn next_frame(&mut self) -> Result<RgbaImage, CaptureError>;

    /// Stops every track of the stream. Called once by `StreamGuard`.
    fn stop(&mut self);
}

/// Something that can open a stream on the visible display.
pub trait DisplaySource {
    type Stream: DisplayStream;

    /// Opens a stream. May block on a platform permission prompt.
    fn open(&self) -> Result<Self::Stream, CaptureError>;
}

/// Owns an open stream and stops it exactly once, on `stop` or on drop.
pub struct StreamGuard<S: DisplayStream> {
    stream: S,
    stopped: bool,
}

impl<S: DisplayStream> StreamGuard<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            stopped: false,
        }
    }

    pub fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        self.stream.next_frame()
    }

    /// Stops the stream now.
    pub fn stop(mut self) {
        self.stop_once();
    }

    fn stop_once(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.stream.stop();
        debug!("Capture stream stopped");
    }
}

impl<S: DisplayStream> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        self.stop_once();
    }
}
