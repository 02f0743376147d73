//! Partitions a cropped board image into cells and classifies each one.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::{classify, CellSymbol};
use super::hsv::rgb_to_hsv;
use super::sampler::{median_color, CellBounds};
use crate::error::GridError;

/// Marker used for empty cells in the text form of a grid.
pub const EMPTY_CELL_CHAR: char = '.';

/// Cell geometry for an image split into `cols` square-ish columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridLayout {
    /// Derives the row count from the image height, assuming square cells.
    pub fn compute(width: u32, height: u32, cols: u32) -> Result<Self, GridError> {
        let degenerate = GridError::DegenerateSelection { width, height, cols };
        if cols == 0 || width == 0 || height == 0 {
            return Err(degenerate);
        }

        let cell_width = width as f64 / cols as f64;
        let rows = (height as f64 / cell_width).round() as u32;
        if rows == 0 {
            return Err(degenerate);
        }
        let cell_height = height as f64 / rows as f64;

        if cell_width.floor() < 1.0 || cell_height.floor() < 1.0 {
            return Err(degenerate);
        }

        Ok(Self {
            cols,
            rows,
            cell_width,
            cell_height,
        })
    }

    /// Pixel bounds of the cell at (`row`, `col`).
    pub fn cell_bounds(&self, row: u32, col: u32) -> CellBounds {
        CellBounds::new(
            (col as f64 * self.cell_width).floor() as u32,
            (row as f64 * self.cell_height).floor() as u32,
            self.cell_width.floor() as u32,
            self.cell_height.floor() as u32,
        )
    }
}

/// Row-major grid of classified cells. Row 0 is the top of the capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGrid {
    rows: Vec<Vec<Option<CellSymbol>>>,
    cols: usize,
}

impl BoardGrid {
    pub fn new(rows: Vec<Vec<Option<CellSymbol>>>, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellSymbol> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Option<CellSymbol>>] {
        &self.rows
    }

    /// Each row as a string of symbol letters, `.` for empty cells.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(EMPTY_CELL_CHAR, CellSymbol::as_char))
                    .collect()
            })
            .collect()
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

/// Classifies every cell of `image`, split into `cols` columns.
pub fn build_grid(image: &RgbaImage, cols: u32) -> Result<BoardGrid, GridError> {
    let layout = GridLayout::compute(image.width(), image.height(), cols)?;
    debug!(
        "Grid layout: {}x{} cells of {:.2}x{:.2}px",
        layout.cols, layout.rows, layout.cell_width, layout.cell_height
    );

    let mut rows = Vec::with_capacity(layout.rows as usize);
    for row in 0..layout.rows {
        let mut cells = Vec::with_capacity(layout.cols as usize);
        for col in 0..layout.cols {
            let bounds = layout.cell_bounds(row, col);
            let sample = median_color(image, bounds).ok_or(GridError::EmptyCell {
                row: row as usize,
                col: col as usize,
            })?;
            let hsv = rgb_to_hsv(sample.r, sample.g, sample.b);
            cells.push(classify(&hsv));
        }
        rows.push(cells);
    }

    Ok(BoardGrid::new(rows, layout.cols as usize))
}
