//! Optional on-disk record of each import.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::capture::Frame;
use crate::error::Result;
use crate::selection::{render_overlay, CroppedImage, OverlayStyle, Point, SelectionRect};
use crate::vision::BoardGrid;

/// Grid as written to `<timestamp>_grid.json`.
#[derive(Debug, Serialize)]
struct GridRecord<'a> {
    columns: usize,
    rows: Vec<String>,
    cells: &'a BoardGrid,
}

/// Files written by one `save_snapshot` call.
#[derive(Clone, Debug)]
pub struct SnapshotFiles {
    pub crop: PathBuf,
    pub preview: PathBuf,
    pub grid: PathBuf,
}

/// Writes the crop, the frame with the selection overlay, and the grid into
/// `dir`, all sharing one timestamp prefix.
pub fn save_snapshot(
    dir: &Path,
    frame: &Frame,
    crop: &CroppedImage,
    grid: &BoardGrid,
    style: &OverlayStyle,
) -> Result<SnapshotFiles> {
    fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");

    let files = SnapshotFiles {
        crop: dir.join(format!("{}_crop.png", timestamp)),
        preview: dir.join(format!("{}_preview.png", timestamp)),
        grid: dir.join(format!("{}_grid.json", timestamp)),
    };

    crop.image.save(&files.crop)?;

    let rect = crop.rect;
    let selection = SelectionRect {
        anchor: Point::new(rect.x as f32, rect.y as f32),
        cursor: Point::new(
            (rect.x + rect.width) as f32,
            (rect.y + rect.height) as f32,
        ),
    };
    render_overlay(frame.image(), &selection, style).save(&files.preview)?;

    let record = GridRecord {
        columns: grid.col_count(),
        rows: grid.to_lines(),
        cells: grid,
    };
    fs::write(&files.grid, serde_json::to_string_pretty(&record)?)?;

    info!("Snapshot saved to {}", files.grid.display());
    Ok(files)
}
