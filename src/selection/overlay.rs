//! Raster rendering of the selection overlay, used for saved previews.

use image::{Rgba, RgbaImage};

use super::geometry::SelectionRect;

/// Color of the dashed border.
pub const BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// How the area outside the selection and the border are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Opacity of the black shade over unselected areas (0.0-1.0)
    pub opacity: f32,
    /// Length of each dash and each gap
    pub dash_length: f32,
    /// Border thickness in pixels
    pub border_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            opacity: 0.7,
            dash_length: 5.0,
            border_width: 2.0,
        }
    }
}

impl OverlayStyle {
    /// True if the dash pattern is "on" at `offset` along an edge.
    pub fn dash_on(&self, offset: u32) -> bool {
        let dash = self.dash_length.max(1.0);
        ((offset as f32 / dash).floor() as u32) % 2 == 0
    }
}

/// Draws `frame` with everything outside `selection` darkened and a dashed
/// border around it.
pub fn render_overlay(frame: &RgbaImage, selection: &SelectionRect, style: &OverlayStyle) -> RgbaImage {
    let (width, height) = frame.dimensions();
    let rect = selection.to_pixel_rect(width, height);
    let keep = 1.0 - style.opacity.clamp(0.0, 1.0);

    let mut img = frame.clone();
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let inside = x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height;
        if !inside {
            for c in 0..3 {
                pixel[c] = (pixel[c] as f32 * keep).round() as u8;
            }
        }
    }

    if rect.is_empty() {
        return img;
    }

    let thickness = (style.border_width.round() as u32).min(rect.width).min(rect.height);
    for t in 0..thickness {
        for dx in 0..rect.width {
            if style.dash_on(dx) {
                img.put_pixel(rect.x + dx, rect.y + t, BORDER_COLOR);
                img.put_pixel(rect.x + dx, rect.y + rect.height - 1 - t, BORDER_COLOR);
            }
        }
        for dy in 0..rect.height {
            if style.dash_on(dy) {
                img.put_pixel(rect.x + t, rect.y + dy, BORDER_COLOR);
                img.put_pixel(rect.x + rect.width - 1 - t, rect.y + dy, BORDER_COLOR);
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::geometry::Point;
    use image::ImageBuffer;

    fn gray_frame() -> RgbaImage {
        ImageBuffer::from_pixel(100, 60, Rgba([100, 100, 100, 255]))
    }

    fn selection() -> SelectionRect {
        SelectionRect {
            anchor: Point::new(70.0, 50.0),
            cursor: Point::new(20.0, 10.0),
        }
    }

    #[test]
    fn test_outside_is_dimmed() {
        let out = render_overlay(&gray_frame(), &selection(), &OverlayStyle::default());
        assert_eq!(*out.get_pixel(5, 5), Rgba([30, 30, 30, 255]));
        assert_eq!(*out.get_pixel(90, 30), Rgba([30, 30, 30, 255]));
        assert_eq!(*out.get_pixel(45, 55), Rgba([30, 30, 30, 255]));
    }

    #[test]
    fn test_inside_untouched() {
        let out = render_overlay(&gray_frame(), &selection(), &OverlayStyle::default());
        assert_eq!(*out.get_pixel(45, 30), Rgba([100, 100, 100, 255]));
    }

    #[test]
    fn test_border_is_dashed() {
        let out = render_overlay(&gray_frame(), &selection(), &OverlayStyle::default());
        // top edge: dash on for offsets 0..5, off for 5..10
        assert_eq!(*out.get_pixel(20, 10), BORDER_COLOR);
        assert_eq!(*out.get_pixel(24, 11), BORDER_COLOR);
        assert_eq!(*out.get_pixel(27, 10), Rgba([100, 100, 100, 255]));
        assert_eq!(*out.get_pixel(30, 10), BORDER_COLOR);
        // right edge, inner column of the 2px border
        assert_eq!(*out.get_pixel(68, 12), BORDER_COLOR);
    }

    #[test]
    fn test_empty_selection_only_dims() {
        let click = SelectionRect::at(Point::new(40.0, 40.0));
        let out = render_overlay(&gray_frame(), &click, &OverlayStyle::default());
        assert!(out.pixels().all(|p| *p == Rgba([30, 30, 30, 255])));
    }

    #[test]
    fn test_dash_pattern() {
        let style = OverlayStyle::default();
        assert!(style.dash_on(0));
        assert!(style.dash_on(4));
        assert!(!style.dash_on(5));
        assert!(!style.dash_on(9));
        assert!(style.dash_on(10));
    }
}
