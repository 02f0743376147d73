//! Board Snap
//!
//! A desktop tool that captures the screen, lets the user drag a rectangle
//! around a game board, and imports the classified cells into a board view.

// Hide console window on Windows for GUI mode
#![windows_subsystem = "windows"]

mod gui;

use anyhow::{anyhow, Result};
use tracing::{error, info};

use board_snap::{config, logging, paths};

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        error!("[PANIC]{} {}", location, msg);
        eprintln!("[PANIC]{} {}", location, msg);
    }));

    #[cfg(windows)]
    unsafe {
        windows::Win32::System::WinRT::RoInitialize(
            windows::Win32::System::WinRT::RO_INIT_MULTITHREADED,
        )?
    };

    // Ensure output directories exist
    paths::ensure_directories()?;
    logging::init(&paths::get_log_file());

    // Load configuration
    config::init_config();
    let config = config::get_config();

    info!("Starting GUI application...");
    match gui::run_gui(config) {
        Ok(()) => {
            info!("GUI application exited normally");
            Ok(())
        }
        Err(e) => {
            error!("GUI error: {}", e);
            Err(anyhow!("GUI error: {}", e))
        }
    }
}
