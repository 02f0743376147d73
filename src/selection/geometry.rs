//! Selection geometry in frame-local coordinates.

use serde::{Deserialize, Serialize};

/// A pointer position relative to the frame's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps the point to `[0, width] x [0, height]`.
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        Self {
            x: self.x.clamp(0.0, width as f32),
            y: self.y.clamp(0.0, height as f32),
        }
    }

    /// True if the point lies inside `[0, width] x [0, height]`, edges included.
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x <= width as f32 && self.y <= height as f32
    }
}

/// The rectangle being dragged: where the drag started and where the pointer is now.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub anchor: Point,
    pub cursor: Point,
}

impl SelectionRect {
    /// A zero-size selection at `point`.
    pub fn at(point: Point) -> Self {
        Self {
            anchor: point,
            cursor: point,
        }
    }

    /// Returns `(min, max)` corners, independent of drag direction.
    pub fn normalized(&self) -> (Point, Point) {
        let min = Point::new(
            self.anchor.x.min(self.cursor.x),
            self.anchor.y.min(self.cursor.y),
        );
        let max = Point::new(
            self.anchor.x.max(self.cursor.x),
            self.anchor.y.max(self.cursor.y),
        );
        (min, max)
    }

    /// Integer pixel rectangle covered by the selection, clipped to the frame.
    pub fn to_pixel_rect(&self, frame_width: u32, frame_height: u32) -> PixelRect {
        let (min, max) = self.normalized();
        let x = (min.x.max(0.0).floor() as u32).min(frame_width);
        let y = (min.y.max(0.0).floor() as u32).min(frame_height);
        let width = ((max.x - min.x).floor() as u32).min(frame_width - x);
        let height = ((max.y - min.y).floor() as u32).min(frame_height - y);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// An integer rectangle in frame pixels. May be zero-sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned area in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The four areas outside the selection that get dimmed: above, below, left, right.
pub fn shade_regions(selection: &SelectionRect, frame_width: u32, frame_height: u32) -> [Region; 4] {
    let (min, max) = selection.normalized();
    let (w, h) = (frame_width as f32, frame_height as f32);
    let band = max.y - min.y;
    [
        Region { x: 0.0, y: 0.0, width: w, height: min.y },
        Region { x: 0.0, y: max.y, width: w, height: h - max.y },
        Region { x: 0.0, y: min.y, width: min.x, height: band },
        Region { x: max.x, y: min.y, width: w - max.x, height: band },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_ignores_drag_direction() {
        let forward = SelectionRect {
            anchor: Point::new(10.0, 10.0),
            cursor: Point::new(50.0, 80.0),
        };
        let backward = SelectionRect {
            anchor: Point::new(50.0, 80.0),
            cursor: Point::new(10.0, 10.0),
        };
        let expected = (Point::new(10.0, 10.0), Point::new(50.0, 80.0));
        assert_eq!(forward.normalized(), expected);
        assert_eq!(backward.normalized(), expected);
    }

    #[test]
    fn test_mixed_direction_normalization() {
        let rect = SelectionRect {
            anchor: Point::new(50.0, 10.0),
            cursor: Point::new(10.0, 80.0),
        };
        assert_eq!(
            rect.normalized(),
            (Point::new(10.0, 10.0), Point::new(50.0, 80.0))
        );
    }

    #[test]
    fn test_clamp_and_bounds() {
        assert_eq!(Point::new(-5.0, 300.0).clamp_to(200, 100), Point::new(0.0, 100.0));
        assert!(Point::new(200.0, 100.0).is_within(200, 100));
        assert!(!Point::new(200.5, 10.0).is_within(200, 100));
        assert!(!Point::new(-0.1, 10.0).is_within(200, 100));
    }

    #[test]
    fn test_pixel_rect_truncates() {
        let rect = SelectionRect {
            anchor: Point::new(10.7, 20.2),
            cursor: Point::new(40.9, 25.0),
        };
        assert_eq!(
            rect.to_pixel_rect(100, 100),
            PixelRect { x: 10, y: 20, width: 30, height: 4 }
        );
    }

    #[test]
    fn test_pixel_rect_clipped_at_frame_edge() {
        let rect = SelectionRect {
            anchor: Point::new(90.5, 90.5),
            cursor: Point::new(100.0, 100.0),
        };
        let px = rect.to_pixel_rect(100, 100);
        assert!(px.x + px.width <= 100);
        assert!(px.y + px.height <= 100);
    }

    #[test]
    fn test_zero_area_selection() {
        let rect = SelectionRect::at(Point::new(5.0, 5.0));
        assert!(rect.to_pixel_rect(10, 10).is_empty());
    }

    #[test]
    fn test_shade_regions_cover_outside() {
        let rect = SelectionRect {
            anchor: Point::new(60.0, 70.0),
            cursor: Point::new(20.0, 30.0),
        };
        let [above, below, left, right] = shade_regions(&rect, 100, 100);
        assert_eq!(above, Region { x: 0.0, y: 0.0, width: 100.0, height: 30.0 });
        assert_eq!(below, Region { x: 0.0, y: 70.0, width: 100.0, height: 30.0 });
        assert_eq!(left, Region { x: 0.0, y: 30.0, width: 20.0, height: 40.0 });
        assert_eq!(right, Region { x: 60.0, y: 30.0, width: 40.0, height: 40.0 });

        let shaded: f32 = [above, below, left, right]
            .iter()
            .map(|r| r.width * r.height)
            .sum();
        assert_eq!(shaded, 100.0 * 100.0 - 40.0 * 40.0);
    }
}
