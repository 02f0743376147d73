//! Representative color of a cell.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Integer pixel extent of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellBounds {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Clips the bounds to an image of the given size.
    pub fn clip(&self, image_width: u32, image_height: u32) -> Self {
        let x = self.x.min(image_width);
        let y = self.y.min(image_height);
        Self {
            x,
            y,
            width: self.width.min(image_width - x),
            height: self.height.min(image_height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// RGB color chosen to represent a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Per-channel median color of the pixels inside `bounds`.
///
/// Each channel is sorted on its own and the element at `floor(n / 2)` is
/// taken, so the result need not be a pixel that occurs in the cell. Returns
/// `None` when the clipped region holds no pixels.
pub fn median_color(image: &RgbaImage, bounds: CellBounds) -> Option<ColorSample> {
    let bounds = bounds.clip(image.width(), image.height());
    if bounds.is_empty() {
        return None;
    }

    let count = (bounds.width * bounds.height) as usize;
    let mut reds = Vec::with_capacity(count);
    let mut greens = Vec::with_capacity(count);
    let mut blues = Vec::with_capacity(count);

    for y in bounds.y..bounds.y + bounds.height {
        for x in bounds.x..bounds.x + bounds.width {
            let pixel = image.get_pixel(x, y);
            reds.push(pixel[0]);
            greens.push(pixel[1]);
            blues.push(pixel[2]);
        }
    }

    reds.sort_unstable();
    greens.sort_unstable();
    blues.sort_unstable();

    let mid = count / 2;
    Some(ColorSample {
        r: reds[mid],
        g: greens[mid],
        b: blues[mid],
    })
}
