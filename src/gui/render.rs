//! GUI rendering functions.
//!
//! Contains the control panel, the board preview and the selection overlay.

use eframe::egui::{self, Color32, Pos2, Rect, RichText, Shape, Stroke, TextureHandle, Vec2};

use board_snap::selection::{shade_regions, OverlayStyle, SelectionSession};
use board_snap::vision::CellSymbol;

use super::state::{AppStatus, BoardView, GuiState};

/// Side length of one board cell in the preview.
const CELL_SIZE: f32 = 14.0;

/// Preview color of a cell.
pub fn symbol_color(symbol: CellSymbol) -> Color32 {
    match symbol {
        CellSymbol::Z => Color32::from_rgb(215, 15, 55),
        CellSymbol::L => Color32::from_rgb(227, 91, 2),
        CellSymbol::O => Color32::from_rgb(227, 159, 2),
        CellSymbol::S => Color32::from_rgb(89, 177, 1),
        CellSymbol::I => Color32::from_rgb(15, 155, 215),
        CellSymbol::J => Color32::from_rgb(33, 65, 198),
        CellSymbol::T => Color32::from_rgb(175, 41, 138),
        CellSymbol::G => Color32::from_gray(150),
    }
}

/// Render the status line and the capture button.
/// Returns true if the capture button was clicked.
pub fn render_controls(ui: &mut egui::Ui, state: &GuiState) -> bool {
    let mut capture_clicked = false;

    ui.horizontal(|ui| {
        ui.label("Status:");

        let status_color = match &state.status {
            AppStatus::Idle => Color32::GRAY,
            AppStatus::Capturing | AppStatus::Selecting => Color32::from_rgb(0, 120, 200),
            AppStatus::Imported { .. } => Color32::from_rgb(0, 150, 0),
            AppStatus::Cancelled => Color32::from_rgb(200, 150, 0),
            AppStatus::Error(_) => Color32::from_rgb(200, 0, 0),
        };

        ui.label(RichText::new(state.status.status_text()).color(status_color));
    });

    ui.add_space(8.0);

    ui.add_enabled_ui(!state.status.is_busy(), |ui| {
        if ui.button(RichText::new("Capture (Ctrl+I)").size(16.0)).clicked() {
            capture_clicked = true;
        }
    });

    capture_clicked
}

/// Render the imported board, bottom row at the bottom. Only rows up to the
/// visible height or the highest filled row are drawn.
pub fn render_board(ui: &mut egui::Ui, board: &BoardView, visible_height: usize) {
    let dims = board.dimensions();
    let shown = board
        .top_filled_row()
        .map_or(0, |top| top + 1)
        .max(visible_height)
        .min(dims.full_height);

    let size = Vec2::new(dims.width as f32 * CELL_SIZE, shown as f32 * CELL_SIZE);
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(20));

    for row in 0..shown {
        for col in 0..dims.width {
            let Some(symbol) = board.cell(row, col) else {
                continue;
            };
            let min = Pos2::new(
                rect.min.x + col as f32 * CELL_SIZE,
                rect.max.y - (row + 1) as f32 * CELL_SIZE,
            );
            let cell = Rect::from_min_size(min, Vec2::splat(CELL_SIZE)).shrink(0.5);
            painter.rect_filled(cell, 1.0, symbol_color(symbol));
            painter.text(
                cell.center(),
                egui::Align2::CENTER_CENTER,
                symbol.as_char(),
                egui::FontId::monospace(9.0),
                Color32::WHITE,
            );
        }
    }
}

/// Paint the captured frame with the selection overlay on top.
/// Returns the screen rect the frame occupies.
pub fn render_selection(
    ui: &mut egui::Ui,
    texture: &TextureHandle,
    session: &SelectionSession,
    style: &OverlayStyle,
    pixels_per_point: f32,
) -> Rect {
    let frame = session.frame();
    let size = Vec2::new(frame.width() as f32, frame.height() as f32) / pixels_per_point;
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::drag());
    let painter = ui.painter_at(rect);

    painter.image(
        texture.id(),
        rect,
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );

    let Some(selection) = session.selector().selection() else {
        return rect;
    };

    let to_screen = |x: f32, y: f32| rect.min + Vec2::new(x, y) / pixels_per_point;
    let shade = Color32::from_black_alpha((style.opacity * 255.0).round() as u8);
    for region in shade_regions(&selection, frame.width(), frame.height()) {
        let min = to_screen(region.x, region.y);
        let max = to_screen(region.x + region.width, region.y + region.height);
        painter.rect_filled(Rect::from_min_max(min, max), 0.0, shade);
    }

    let (min, max) = selection.normalized();
    let (min, max) = (to_screen(min.x, min.y), to_screen(max.x, max.y));
    let outline = [
        min,
        Pos2::new(max.x, min.y),
        max,
        Pos2::new(min.x, max.y),
        min,
    ];
    let dash = style.dash_length / pixels_per_point;
    painter.extend(Shape::dashed_line(
        &outline,
        Stroke::new(style.border_width / pixels_per_point, Color32::WHITE),
        dash,
        dash,
    ));

    rect
}
