//! Theme constants for the qubic GUI

use egui::Color32;

// Layer colors
pub const LAYER_BG: Color32 = Color32::from_rgb(52, 58, 70);
pub const CELL_BG: Color32 = Color32::from_rgb(68, 75, 90);
pub const CELL_BORDER: Color32 = Color32::from_rgb(92, 100, 118);

// Marks
pub const MARK_X: Color32 = Color32::from_rgb(236, 96, 88);
pub const MARK_O: Color32 = Color32::from_rgb(94, 170, 240);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 210, 90);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(200, 200, 210, 50)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_OK: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_WAIT: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const LAYER_GAP: f32 = 24.0;
pub const LAYER_PADDING: f32 = 10.0;
pub const MARK_RADIUS_RATIO: f32 = 0.32;
pub const MARK_STROKE: f32 = 4.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
