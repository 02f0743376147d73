//! Pixel classification pipeline.
//!
//! Turns a cropped board image into a grid of cell symbols:
//! - `median_color` picks a representative color per cell
//! - `rgb_to_hsv` converts it to hue/saturation/value
//! - `classify` maps it through the ordered rule table
//! - `build_grid` runs the above for every cell

pub mod classifier;
pub mod grid;
pub mod hsv;
pub mod sampler;

pub use classifier::{classify, CellSymbol};
pub use grid::{build_grid, BoardGrid, GridLayout};
pub use hsv::{rgb_to_hsv, Hsv};
pub use sampler::{median_color, CellBounds, ColorSample};
