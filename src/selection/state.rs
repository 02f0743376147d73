//! Crop selector state machine.
//!
//! `Idle → Dragging → Completed`, with `Cancelled` reachable from the first
//! two. Transitions are plain methods so the machine can be driven without
//! any windowing system.

use super::geometry::{PixelRect, Point, SelectionRect};

/// Current phase of a selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Waiting for a pointer-down inside the frame.
    Idle,
    /// Pointer is held; the rect follows the cursor.
    Dragging(SelectionRect),
    /// Pointer released; holds the normalized pixel rect.
    Completed(PixelRect),
    /// Abandoned before completion.
    Cancelled,
}

/// What a transition did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    Ignored,
    Started,
    Redraw,
    Completed(PixelRect),
    Cancelled,
}

/// Rectangle selection over a frame of fixed size.
#[derive(Clone, Debug)]
pub struct CropSelector {
    phase: Phase,
    width: u32,
    height: u32,
}

impl CropSelector {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            phase: Phase::Idle,
            width,
            height,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The rect being dragged, if any.
    pub fn selection(&self) -> Option<SelectionRect> {
        match self.phase {
            Phase::Dragging(rect) => Some(rect),
            _ => None,
        }
    }

    /// True if a pointer-down at `point` would start a drag.
    pub fn accepts_pointer_down(&self, point: Point) -> bool {
        self.phase == Phase::Idle && point.is_within(self.width, self.height)
    }

    pub fn pointer_down(&mut self, point: Point) -> Transition {
        if !self.accepts_pointer_down(point) {
            return Transition::Ignored;
        }
        self.phase = Phase::Dragging(SelectionRect::at(point));
        Transition::Started
    }

    pub fn pointer_move(&mut self, point: Point) -> Transition {
        match &mut self.phase {
            Phase::Dragging(rect) => {
                rect.cursor = point.clamp_to(self.width, self.height);
                Transition::Redraw
            }
            _ => Transition::Ignored,
        }
    }

    pub fn pointer_up(&mut self) -> Transition {
        match self.phase {
            Phase::Dragging(rect) => {
                let pixels = rect.to_pixel_rect(self.width, self.height);
                self.phase = Phase::Completed(pixels);
                Transition::Completed(pixels)
            }
            _ => Transition::Ignored,
        }
    }

    pub fn cancel(&mut self) -> Transition {
        match self.phase {
            Phase::Idle | Phase::Dragging(_) => {
                self.phase = Phase::Cancelled;
                Transition::Cancelled
            }
            _ => Transition::Ignored,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Completed(_) | Phase::Cancelled)
    }
}
