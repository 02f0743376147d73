//! Configuration for board-snap.
//!
//! Loads settings from config.json next to the executable at startup. Any
//! field missing from the file takes its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use tracing::{info, warn};

use crate::board::BoardDimensions;
use crate::capture::CaptureOptions;
use crate::selection::OverlayStyle;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<SnapConfig> = OnceLock::new();

/// Size of the engine board that captured grids are imported into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Cells per row
    pub width: usize,
    /// Rows shown to the player
    pub visible_height: usize,
    /// Hidden rows above the visible area
    pub buffer_rows: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 10,
            visible_height: 20,
            buffer_rows: 20,
        }
    }
}

impl BoardConfig {
    pub fn dimensions(&self) -> BoardDimensions {
        BoardDimensions::new(self.width, self.visible_height + self.buffer_rows)
    }
}

/// Display capture settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Quality of the JPEG round-trip (1-100). `null` disables it.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: Option<u8>,
    /// Maximum wait for the first frame after the stream opens (milliseconds)
    pub frame_timeout_ms: u64,
    /// Delay before opening the stream (milliseconds)
    pub capture_delay_ms: u64,
}

fn default_jpeg_quality() -> Option<u8> {
    Some(95)
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            frame_timeout_ms: 5000,
            capture_delay_ms: 0,
        }
    }
}

impl CaptureConfig {
    pub fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }

    pub fn options(&self) -> CaptureOptions {
        CaptureOptions {
            jpeg_quality: self.jpeg_quality.map(|q| q.clamp(1, 100)),
            capture_delay: Duration::from_millis(self.capture_delay_ms),
        }
    }
}

/// Look of the selection overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Opacity of the black dimming outside the selection (0.0-1.0)
    pub overlay_opacity: f32,
    /// Length of each dash and each gap in the border
    pub dash_length: f32,
    /// Border width
    pub border_width: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            overlay_opacity: 0.7,
            dash_length: 5.0,
            border_width: 2.0,
        }
    }
}

impl SelectionConfig {
    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            opacity: self.overlay_opacity.clamp(0.0, 1.0),
            dash_length: self.dash_length.max(1.0),
            border_width: self.border_width.max(0.0),
        }
    }
}

/// Complete board-snap configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Number of grid columns in a captured region
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Save crop, preview and grid files for every import
    #[serde(default)]
    pub save_snapshots: bool,
}

fn default_columns() -> u32 {
    10
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            board: BoardConfig::default(),
            capture: CaptureConfig::default(),
            selection: SelectionConfig::default(),
            save_snapshots: false,
        }
    }
}

/// Parses a configuration document.
pub fn parse_config(contents: &str) -> Result<SnapConfig, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Loads configuration from `path`, or returns defaults if it is missing or
/// invalid.
pub fn load_config_from(path: &Path) -> SnapConfig {
    info!("Looking for config at: {}", path.display());

    if !path.exists() {
        info!("config.json not found. Using default config.");
        return SnapConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match parse_config(&contents) {
            Ok(config) => {
                info!("Config loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to parse config.json: {}. Using defaults.", e);
                SnapConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config.json: {}. Using defaults.", e);
            SnapConfig::default()
        }
    }
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config_from(&crate::paths::get_config_path()));
}

/// Returns the global configuration, loading it on first use.
pub fn get_config() -> &'static SnapConfig {
    CONFIG.get_or_init(|| load_config_from(&crate::paths::get_config_path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SnapConfig::default();
        assert_eq!(config.columns, 10);
        assert_eq!(config.board.dimensions(), BoardDimensions::new(10, 40));
        assert_eq!(config.capture.jpeg_quality, Some(95));
        assert_eq!(config.capture.frame_timeout(), Duration::from_secs(5));
        assert_eq!(config.selection.overlay_opacity, 0.7);
        assert!(!config.save_snapshots);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(parse_config("{}").unwrap(), SnapConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"{ "columns": 12, "board": { "width": 12 }, "capture": { "capture_delay_ms": 250 } }"#,
        )
        .unwrap();
        assert_eq!(config.columns, 12);
        assert_eq!(config.board.width, 12);
        assert_eq!(config.board.visible_height, 20);
        assert_eq!(config.capture.jpeg_quality, Some(95));
        assert_eq!(
            config.capture.options().capture_delay,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_null_quality_disables_round_trip() {
        let config = parse_config(r#"{ "capture": { "jpeg_quality": null } }"#).unwrap();
        assert_eq!(config.capture.options().jpeg_quality, None);
    }

    #[test]
    fn test_style_is_clamped() {
        let config = parse_config(r#"{ "selection": { "overlay_opacity": 3.0, "dash_length": 0 } }"#)
            .unwrap();
        let style = config.selection.style();
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.dash_length, 1.0);
        assert_eq!(style.border_width, 2.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "save_snapshots": true }}"#).unwrap();
        let config = load_config_from(file.path());
        assert!(config.save_snapshots);
        assert_eq!(config.columns, 10);
    }

    #[test]
    fn test_invalid_or_missing_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(load_config_from(file.path()), SnapConfig::default());

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_config_from(&dir.path().join("config.json")),
            SnapConfig::default()
        );
    }
}
