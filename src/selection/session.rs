//! A selection over one captured frame, wired to pointer input.

use image::RgbaImage;
use tracing::{debug, info};

use super::geometry::{PixelRect, Point};
use super::grab::{PointerGrab, PointerRouter};
use super::state::{CropSelector, Phase, Transition};
use crate::capture::Frame;

/// Pointer input in frame-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Cancel,
}

/// The selected part of a frame.
#[derive(Clone, Debug)]
pub struct CroppedImage {
    pub image: RgbaImage,
    pub rect: PixelRect,
}

impl CroppedImage {
    /// Copies `rect` out of `frame`. The rect must already be clipped.
    pub fn from_frame(frame: &Frame, rect: PixelRect) -> Self {
        let image = image::imageops::crop_imm(frame.image(), rect.x, rect.y, rect.width, rect.height)
            .to_image();
        Self { image, rect }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Result of routing one event.
#[derive(Clone, Debug)]
pub enum SessionUpdate {
    /// Nothing changed.
    Ignored,
    /// The overlay should be repainted.
    Redraw,
    /// Pointer released; the crop may be zero-sized.
    Completed(CroppedImage),
    /// The selection was abandoned.
    Cancelled,
}

/// Owns the frame, the selector and, while dragging, the pointer grab.
pub struct SelectionSession {
    frame: Frame,
    selector: CropSelector,
    router: PointerRouter,
    grab: Option<PointerGrab>,
}

impl SelectionSession {
    pub fn new(frame: Frame, router: PointerRouter) -> Self {
        let selector = CropSelector::new(frame.width(), frame.height());
        debug!("Selection started on {}x{} frame", frame.width(), frame.height());
        Self {
            frame,
            selector,
            router,
            grab: None,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn selector(&self) -> &CropSelector {
        &self.selector
    }

    pub fn phase(&self) -> Phase {
        self.selector.phase()
    }

    /// True while this session holds the pointer grab.
    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.selector.is_finished()
    }

    pub fn handle(&mut self, event: PointerEvent) -> SessionUpdate {
        match event {
            PointerEvent::Down(point) => self.on_down(point),
            PointerEvent::Move(point) => {
                if self.grab.is_none() {
                    return SessionUpdate::Ignored;
                }
                match self.selector.pointer_move(point) {
                    Transition::Redraw => SessionUpdate::Redraw,
                    _ => SessionUpdate::Ignored,
                }
            }
            PointerEvent::Up => {
                if self.grab.is_none() {
                    return SessionUpdate::Ignored;
                }
                match self.selector.pointer_up() {
                    Transition::Completed(rect) => {
                        self.release_grab();
                        info!(
                            "Selected {}x{} at ({}, {})",
                            rect.width, rect.height, rect.x, rect.y
                        );
                        SessionUpdate::Completed(CroppedImage::from_frame(&self.frame, rect))
                    }
                    _ => SessionUpdate::Ignored,
                }
            }
            PointerEvent::Cancel => match self.selector.cancel() {
                Transition::Cancelled => {
                    self.release_grab();
                    info!("Selection cancelled");
                    SessionUpdate::Cancelled
                }
                _ => SessionUpdate::Ignored,
            },
        }
    }

    fn on_down(&mut self, point: Point) -> SessionUpdate {
        if !self.selector.accepts_pointer_down(point) {
            return SessionUpdate::Ignored;
        }
        let Some(grab) = self.router.try_grab() else {
            debug!("Pointer is grabbed by another selection");
            return SessionUpdate::Ignored;
        };
        match self.selector.pointer_down(point) {
            Transition::Started => {
                self.grab = Some(grab);
                SessionUpdate::Redraw
            }
            _ => SessionUpdate::Ignored,
        }
    }

    fn release_grab(&mut self) {
        if let Some(grab) = self.grab.take() {
            grab.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn frame() -> Frame {
        Frame::new(ImageBuffer::from_fn(200, 100, |x, y| {
            Rgba([x as u8, y as u8, 0, 255])
        }))
    }

    #[test]
    fn test_drag_completes_with_crop() {
        let router = PointerRouter::new();
        let mut session = SelectionSession::new(frame(), router.clone());

        assert!(matches!(
            session.handle(PointerEvent::Down(Point::new(60.0, 40.0))),
            SessionUpdate::Redraw
        ));
        assert!(session.is_dragging());
        assert!(matches!(
            session.handle(PointerEvent::Move(Point::new(10.5, 20.9))),
            SessionUpdate::Redraw
        ));

        match session.handle(PointerEvent::Up) {
            SessionUpdate::Completed(crop) => {
                assert_eq!(crop.rect, PixelRect { x: 10, y: 20, width: 49, height: 19 });
                assert_eq!((crop.width(), crop.height()), (49, 19));
                assert_eq!(*crop.image.get_pixel(0, 0), Rgba([10, 20, 0, 255]));
            }
            other => panic!("unexpected update {other:?}"),
        }
        assert!(session.is_finished());
        assert_eq!(router.acquired_count(), 1);
        assert_eq!(router.released_count(), 1);
    }

    #[test]
    fn test_move_and_up_ignored_without_grab() {
        let router = PointerRouter::new();
        let mut session = SelectionSession::new(frame(), router.clone());
        assert!(matches!(
            session.handle(PointerEvent::Move(Point::new(5.0, 5.0))),
            SessionUpdate::Ignored
        ));
        assert!(matches!(session.handle(PointerEvent::Up), SessionUpdate::Ignored));
        assert_eq!(router.acquired_count(), 0);
    }

    #[test]
    fn test_down_outside_frame_takes_no_grab() {
        let router = PointerRouter::new();
        let mut session = SelectionSession::new(frame(), router.clone());
        session.handle(PointerEvent::Down(Point::new(250.0, 10.0)));
        assert!(!router.is_grabbed());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_cancel_mid_drag_releases_once() {
        let router = PointerRouter::new();
        let mut session = SelectionSession::new(frame(), router.clone());
        session.handle(PointerEvent::Down(Point::new(10.0, 10.0)));
        assert!(matches!(
            session.handle(PointerEvent::Cancel),
            SessionUpdate::Cancelled
        ));
        assert!(!router.is_grabbed());
        drop(session);
        assert_eq!(router.released_count(), 1);
    }

    #[test]
    fn test_drop_mid_drag_releases_grab() {
        let router = PointerRouter::new();
        {
            let mut session = SelectionSession::new(frame(), router.clone());
            session.handle(PointerEvent::Down(Point::new(10.0, 10.0)));
            assert!(router.is_grabbed());
        }
        assert!(!router.is_grabbed());
        assert_eq!(router.released_count(), 1);
    }

    #[test]
    fn test_second_session_cannot_drag_concurrently() {
        let router = PointerRouter::new();
        let mut first = SelectionSession::new(frame(), router.clone());
        let mut second = SelectionSession::new(frame(), router.clone());

        first.handle(PointerEvent::Down(Point::new(10.0, 10.0)));
        assert!(matches!(
            second.handle(PointerEvent::Down(Point::new(20.0, 20.0))),
            SessionUpdate::Ignored
        ));
        assert_eq!(second.phase(), Phase::Idle);

        first.handle(PointerEvent::Up);
        assert!(matches!(
            second.handle(PointerEvent::Down(Point::new(20.0, 20.0))),
            SessionUpdate::Redraw
        ));
    }

    #[test]
    fn test_click_gives_empty_crop() {
        let mut session = SelectionSession::new(frame(), PointerRouter::new());
        session.handle(PointerEvent::Down(Point::new(30.0, 30.0)));
        match session.handle(PointerEvent::Up) {
            SessionUpdate::Completed(crop) => {
                assert!(crop.rect.is_empty());
                assert_eq!((crop.width(), crop.height()), (0, 0));
            }
            other => panic!("unexpected update {other:?}"),
        }
    }
}
