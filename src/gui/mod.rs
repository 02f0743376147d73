//! GUI module for the application.
//!
//! Hosts the capture → select → import flow in an egui/eframe window.

pub mod render;
pub mod state;
pub mod worker;

use std::time::Duration;

use eframe::egui::{self, Event, Key, PointerButton, Pos2, Rect, TextureHandle, Vec2};
use tracing::{error, info, warn};

use board_snap::board::import_grid;
use board_snap::capture::{platform_session, Frame, Viewport};
use board_snap::config::SnapConfig;
use board_snap::error::SnapError;
use board_snap::selection::{
    CroppedImage, Point, PointerEvent, PointerRouter, SelectionSession, SessionUpdate,
};
use board_snap::snapshot::save_snapshot;
use board_snap::vision::build_grid;

use state::{AppStatus, GuiState};
use worker::CaptureWorker;

/// Main GUI application struct.
pub struct SnapApp {
    config: &'static SnapConfig,
    state: GuiState,
    worker: CaptureWorker,
    router: PointerRouter,
    session: Option<SelectionSession>,
    frame_texture: Option<TextureHandle>,
}

impl SnapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &'static SnapConfig) -> Self {
        Self {
            config,
            state: GuiState::new(config.board.dimensions()),
            worker: CaptureWorker::new(),
            router: PointerRouter::new(),
            session: None,
            frame_texture: None,
        }
    }

    /// Handle Ctrl+I or the capture button.
    fn handle_capture(&mut self, ctx: &egui::Context) {
        if self.state.status.is_busy() || self.session.is_some() {
            return;
        }

        let size = ctx.available_rect().size() * ctx.pixels_per_point();
        let viewport = Viewport::new(size.x as u32, size.y as u32);
        let capture = self.config.capture.clone();

        if self
            .worker
            .start(move || platform_session(&capture).capture_frame(viewport))
        {
            info!("GUI: Capture started (viewport {}x{})", viewport.max_width, viewport.max_height);
            self.state.status = AppStatus::Capturing;
        }
    }

    /// Poll the capture thread and start a selection when the frame arrives.
    fn poll_capture(&mut self, ctx: &egui::Context) {
        let Some(result) = self.worker.poll() else {
            return;
        };

        match result {
            Ok(frame) => {
                self.frame_texture = Some(load_frame_texture(ctx, &frame));
                self.session = Some(SelectionSession::new(frame, self.router.clone()));
                self.state.status = AppStatus::Selecting;
            }
            Err(e) => {
                error!("GUI: Capture failed: {}", e);
                self.state.status = AppStatus::Error(e.to_string());
            }
        }
    }

    /// Route this frame's pointer and key events into the selection.
    fn route_events(&mut self, ctx: &egui::Context, frame_rect: Rect) {
        let ppp = ctx.pixels_per_point();
        let to_frame = |pos: Pos2| {
            let local = (pos - frame_rect.min) * ppp;
            Point::new(local.x, local.y)
        };

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            let pointer_event = match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => PointerEvent::Down(to_frame(pos)),
                Event::PointerButton {
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => PointerEvent::Up,
                Event::PointerMoved(pos) => PointerEvent::Move(to_frame(pos)),
                Event::Key {
                    key: Key::Escape,
                    pressed: true,
                    ..
                } => PointerEvent::Cancel,
                _ => continue,
            };

            let Some(session) = self.session.as_mut() else {
                return;
            };
            match session.handle(pointer_event) {
                SessionUpdate::Ignored => {}
                SessionUpdate::Redraw => ctx.request_repaint(),
                SessionUpdate::Completed(crop) => {
                    if let Some(session) = self.session.take() {
                        self.finish_selection(session.frame(), &crop);
                    }
                    self.frame_texture = None;
                    return;
                }
                SessionUpdate::Cancelled => {
                    self.session = None;
                    self.frame_texture = None;
                    self.state.status = AppStatus::Cancelled;
                    return;
                }
            }
        }
    }

    /// Classify the crop and import it into the board.
    fn finish_selection(&mut self, frame: &Frame, crop: &CroppedImage) {
        match self.import_crop(frame, crop) {
            Ok(status) => self.state.status = status,
            Err(e) => {
                error!("GUI: Import failed: {}", e);
                self.state.status = AppStatus::Error(e.to_string());
            }
        }
    }

    fn import_crop(&mut self, frame: &Frame, crop: &CroppedImage) -> Result<AppStatus, SnapError> {
        let grid = build_grid(&crop.image, self.config.columns)?;
        import_grid(&mut self.state.board, &grid, self.config.board.dimensions());

        if self.config.save_snapshots {
            let style = self.config.selection.style();
            if let Err(e) = save_snapshot(
                &board_snap::paths::get_snapshots_dir(),
                frame,
                crop,
                &grid,
                &style,
            ) {
                warn!("GUI: Failed to save snapshot: {}", e);
            }
        }

        Ok(AppStatus::Imported {
            rows: grid.row_count(),
            cols: grid.col_count(),
            filled: grid.filled_count(),
        })
    }
}

impl eframe::App for SnapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_capture(ctx);

        if self.worker.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(Key::I)) {
            self.handle_capture(ctx);
        }

        let style = self.config.selection.style();
        let ppp = ctx.pixels_per_point();

        egui::CentralPanel::default().show(ctx, |ui| {
            if let (Some(session), Some(texture)) = (&self.session, &self.frame_texture) {
                let frame_rect = render::render_selection(ui, texture, session, &style, ppp);
                self.route_events(ctx, frame_rect);
                return;
            }

            ui.heading("Board Snap");
            ui.add_space(8.0);
            if render::render_controls(ui, &self.state) {
                self.handle_capture(ctx);
            }
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                render::render_board(ui, &self.state.board, self.config.board.visible_height);
            });
        });
    }
}

fn load_frame_texture(ctx: &egui::Context, frame: &Frame) -> TextureHandle {
    let size = [frame.width() as usize, frame.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, frame.image().as_raw());
    ctx.load_texture("captured_frame", color_image, egui::TextureOptions::LINEAR)
}

/// Run the GUI application.
/// This function blocks until the window is closed.
pub fn run_gui(config: &'static SnapConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(600.0, 700.0))
            .with_min_inner_size(Vec2::new(400.0, 400.0))
            .with_title("Board Snap")
            // Disable drag-and-drop to avoid COM conflict with RoInitialize (multithreaded)
            .with_drag_and_drop(false),
        ..Default::default()
    };

    eframe::run_native(
        "Board Snap",
        options,
        Box::new(move |cc| {
            info!("GUI: Creating SnapApp instance...");
            Ok(Box::new(SnapApp::new(cc, config)))
        }),
    )
}
