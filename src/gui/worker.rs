//! Background capture thread.
//!
//! The capture call blocks (permission prompt, frame wait), so it runs on
//! its own thread and reports back over a channel polled from `update`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use board_snap::capture::Frame;
use board_snap::error::CaptureError;
use tracing::{debug, error};

pub type CaptureResult = Result<Frame, CaptureError>;

/// Runs at most one capture at a time.
#[derive(Default)]
pub struct CaptureWorker {
    busy: Arc<AtomicBool>,
    receiver: Option<Receiver<CaptureResult>>,
}

impl CaptureWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a capture is in flight or its result has not been polled.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst) || self.receiver.is_some()
    }

    /// Starts `job` on a new thread. Returns false if a capture is already
    /// running.
    pub fn start<F>(&mut self, job: F) -> bool
    where
        F: FnOnce() -> CaptureResult + Send + 'static,
    {
        if self.receiver.is_some()
            || self
                .busy
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
        {
            debug!("Capture already in progress");
            return false;
        }

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        let busy = Arc::clone(&self.busy);

        thread::spawn(move || {
            let result = job();
            busy.store(false, Ordering::SeqCst);
            let _ = sender.send(result);
        });

        true
    }

    /// Returns the capture result once it is available.
    pub fn poll(&mut self) -> Option<CaptureResult> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                error!("Capture thread exited without a result");
                self.receiver = None;
                Some(Err(CaptureError::Backend("capture thread exited".to_string())))
            }
        }
    }
}
