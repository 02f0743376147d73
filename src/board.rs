//! Hand-off of a classified grid to the game board.
//!
//! The board owns its rows bottom-up: row 0 is the floor. A captured grid is
//! top-down, so rows are reversed and then padded with empty rows up to the
//! board's full height.

use tracing::{info, warn};

use crate::vision::{BoardGrid, CellSymbol};

/// One board row, left to right.
pub type BoardRow = Vec<Option<CellSymbol>>;

/// Rows ordered bottom-up.
pub type BoardRows = Vec<BoardRow>;

/// Size of the board a grid is imported into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardDimensions {
    /// Cells per row
    pub width: usize,
    /// Visible rows plus buffer rows
    pub full_height: usize,
}

impl BoardDimensions {
    pub fn new(width: usize, full_height: usize) -> Self {
        Self { width, full_height }
    }
}

/// Receives imported board state.
pub trait BoardSink {
    /// Replaces the whole board in one step. `rows[0]` is the bottom row.
    fn replace_state(&mut self, rows: BoardRows);
}

/// Converts a top-down grid into bottom-up board rows of exactly
/// `dims.full_height` rows by `dims.width` cells.
pub fn board_rows(grid: &BoardGrid, dims: BoardDimensions) -> BoardRows {
    if grid.col_count() != dims.width {
        warn!(
            "Grid has {} columns but the board is {} wide; rows will be fitted",
            grid.col_count(),
            dims.width
        );
    }

    let mut rows: BoardRows = grid
        .rows()
        .iter()
        .rev()
        .map(|row| {
            let mut row = row.clone();
            row.resize(dims.width, None);
            row
        })
        .collect();

    if rows.len() > dims.full_height {
        warn!(
            "Grid has {} rows; dropping the top {} to fit a board of height {}",
            rows.len(),
            rows.len() - dims.full_height,
            dims.full_height
        );
        rows.truncate(dims.full_height);
    }

    rows.resize_with(dims.full_height, || vec![None; dims.width]);
    rows
}

/// Writes `grid` into `sink` as a single state replacement.
pub fn import_grid<S: BoardSink + ?Sized>(sink: &mut S, grid: &BoardGrid, dims: BoardDimensions) {
    let rows = board_rows(grid, dims);
    info!(
        "Importing {}x{} grid ({} filled cells) into {}x{} board",
        grid.col_count(),
        grid.row_count(),
        grid.filled_count(),
        dims.width,
        dims.full_height
    );
    sink.replace_state(rows);
}
