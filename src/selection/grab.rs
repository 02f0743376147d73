//! Pointer grabs: which selection currently receives move/up events.
//!
//! A `PointerGrab` is held for exactly the duration of a drag. The host
//! forwards move and up events to the selection only while a grab is
//! active, and releasing the grab (explicitly or on drop) happens once.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

#[derive(Debug, Default)]
struct GrabState {
    active: AtomicBool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

/// Hands out at most one pointer grab at a time.
#[derive(Clone, Debug, Default)]
pub struct PointerRouter {
    state: Arc<GrabState>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the grab, or `None` if another selection holds it.
    pub fn try_grab(&self) -> Option<PointerGrab> {
        self.state
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        self.state.acquired.fetch_add(1, Ordering::SeqCst);
        debug!("Pointer grab acquired");
        Some(PointerGrab {
            state: Arc::clone(&self.state),
            released: false,
        })
    }

    /// True while some selection is dragging.
    pub fn is_grabbed(&self) -> bool {
        self.state.active.load(Ordering::SeqCst)
    }

    /// Total grabs handed out.
    pub fn acquired_count(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    /// Total grabs released.
    pub fn released_count(&self) -> usize {
        self.state.released.load(Ordering::SeqCst)
    }
}

/// Exclusive right to receive pointer move/up events.
#[derive(Debug)]
pub struct PointerGrab {
    state: Arc<GrabState>,
    released: bool,
}

impl PointerGrab {
    /// Releases the grab now.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.state.active.store(false, Ordering::SeqCst);
        self.state.released.fetch_add(1, Ordering::SeqCst);
        debug!("Pointer grab released");
    }
}

impl Drop for PointerGrab {
    fn drop(&mut self) {
        self.release_once();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_grab_at_a_time() {
        let router = PointerRouter::new();
        let grab = router.try_grab().unwrap();
        assert!(router.is_grabbed());
        assert!(router.try_grab().is_none());

        grab.release();
        assert!(!router.is_grabbed());
        assert!(router.try_grab().is_some());
    }

    #[test]
    fn test_release_counted_once() {
        let router = PointerRouter::new();
        let grab = router.try_grab().unwrap();
        grab.release();
        assert_eq!(router.acquired_count(), 1);
        assert_eq!(router.released_count(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let router = PointerRouter::new();
        {
            let _grab = router.try_grab().unwrap();
        }
        assert!(!router.is_grabbed());
        assert_eq!(router.released_count(), 1);
    }
}
