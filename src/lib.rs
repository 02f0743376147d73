//! board-snap
//!
//! Captures a region of the screen and turns it into a grid of board cells:
//! one-shot display capture, an interactive crop selection, and a per-cell
//! color classifier whose result is handed to the game board.

pub mod board;
pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod selection;
pub mod snapshot;
pub mod vision;

pub use board::{board_rows, import_grid, BoardDimensions, BoardSink};
pub use error::{CaptureError, GridError, Result, SnapError};
pub use vision::{build_grid, BoardGrid, CellSymbol};
