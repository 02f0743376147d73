//! Interactive rectangle selection over a captured frame.
//!
//! `CropSelector` is the pure state machine, `SelectionSession` binds it to
//! a frame and the pointer grab, and `overlay` draws the dimmed preview.

pub mod geometry;
pub mod grab;
pub mod overlay;
pub mod session;
pub mod state;

pub use geometry::{shade_regions, PixelRect, Point, Region, SelectionRect};
pub use grab::{PointerGrab, PointerRouter};
pub use overlay::{render_overlay, OverlayStyle};
pub use session::{CroppedImage, PointerEvent, SelectionSession, SessionUpdate};
pub use state::{CropSelector, Phase, Transition};
