//! GUI application state.
//!
//! Tracks the capture/selection status and the imported board for display.

use board_snap::board::{BoardDimensions, BoardRows, BoardSink};
use board_snap::vision::CellSymbol;

/// Where the capture flow currently is.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AppStatus {
    /// Ready for Ctrl+I
    #[default]
    Idle,
    /// Waiting for the display frame
    Capturing,
    /// Frame shown; waiting for the user to drag a rectangle
    Selecting,
    /// Grid imported into the board
    Imported { rows: usize, cols: usize, filled: usize },
    /// Selection abandoned with Escape
    Cancelled,
    /// Capture or classification failed
    Error(String),
}

impl AppStatus {
    /// Get display text for current status.
    pub fn status_text(&self) -> String {
        match self {
            Self::Idle => "Ready - press Ctrl+I to capture".to_string(),
            Self::Capturing => "Capturing screen...".to_string(),
            Self::Selecting => "Drag to select the board, Esc to cancel".to_string(),
            Self::Imported { rows, cols, filled } => {
                format!("Imported {}x{} grid ({} filled cells)", cols, rows, filled)
            }
            Self::Cancelled => "Selection cancelled".to_string(),
            Self::Error(msg) => format!("Error: {}", msg),
        }
    }

    /// True while a capture or selection is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Capturing | Self::Selecting)
    }
}

/// In-window copy of the board, filled by imports.
#[derive(Debug)]
pub struct BoardView {
    dims: BoardDimensions,
    rows: BoardRows,
}

impl BoardView {
    pub fn new(dims: BoardDimensions) -> Self {
        Self {
            dims,
            rows: vec![vec![None; dims.width]; dims.full_height],
        }
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.dims
    }

    /// Rows bottom-up.
    #[cfg(test)]
    pub fn rows(&self) -> &BoardRows {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<CellSymbol> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Index of the highest row holding a cell, if any.
    pub fn top_filled_row(&self) -> Option<usize> {
        self.rows.iter().rposition(|row| row.iter().any(Option::is_some))
    }
}

impl BoardSink for BoardView {
    fn replace_state(&mut self, rows: BoardRows) {
        self.rows = rows;
    }
}

/// GUI application state.
#[derive(Debug)]
pub struct GuiState {
    pub status: AppStatus,
    pub board: BoardView,
}

impl GuiState {
    pub fn new(dims: BoardDimensions) -> Self {
        Self {
            status: AppStatus::Idle,
            board: BoardView::new(dims),
        }
    }
}
