//! Board rendering for the qubic GUI
//!
//! The cube is drawn as its four z-layers side by side, each a 4x4 grid
//! with x to the right and y downward.

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Cell, Mark, BOARD_SIZE};

use super::theme::*;

/// Board view handles rendering and input for the cube
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Whole drawing area (all four layers)
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell index if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current_turn: Mark,
        last_move: Option<usize>,
        winning_line: Option<u64>,
        accept_input: bool,
    ) -> Option<usize> {
        let available = ui.available_size();
        let layers = BOARD_SIZE as f32;
        let n = BOARD_SIZE as f32;

        // Four layers plus gaps must fit the width, one layer the height
        let by_width = (available.x - (layers - 1.0) * LAYER_GAP - layers * 2.0 * LAYER_PADDING)
            / (layers * n);
        let by_height = (available.y - 2.0 * LAYER_PADDING - 30.0) / n;
        self.cell_size = by_width.min(by_height).max(12.0);

        let width = layers * self.layer_extent() + (layers - 1.0) * LAYER_GAP;
        let height = self.layer_extent() + 30.0;
        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::click());
        self.board_rect = response.rect;

        for z in 0..BOARD_SIZE {
            self.draw_layer(&painter, z);
        }

        for idx in 0..64 {
            if let Some(mark) = board.get(idx) {
                self.draw_mark(&painter, idx, mark, 255);
            }
        }

        if let Some(idx) = last_move {
            painter.circle_filled(self.cell_center(idx), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(mask) = winning_line {
            self.draw_winning_line(&painter, mask);
        }

        let mut clicked = None;
        if accept_input {
            if let Some(idx) = response.hover_pos().and_then(|p| self.screen_to_cell(p)) {
                if board.is_empty(idx) {
                    painter.rect_filled(self.cell_rect(idx).shrink(2.0), CornerRadius::same(4), hover_valid());
                    self.draw_mark(&painter, idx, current_turn, 90);
                    if response.clicked() {
                        clicked = Some(idx);
                    }
                }
            }
        }

        clicked
    }

    #[inline]
    fn layer_extent(&self) -> f32 {
        BOARD_SIZE as f32 * self.cell_size + 2.0 * LAYER_PADDING
    }

    fn layer_rect(&self, z: usize) -> Rect {
        let left = self.board_rect.min.x + z as f32 * (self.layer_extent() + LAYER_GAP);
        let top = self.board_rect.min.y + 30.0;
        Rect::from_min_size(Pos2::new(left, top), Vec2::splat(self.layer_extent()))
    }

    fn cell_rect(&self, idx: usize) -> Rect {
        let cell = Cell::from_index(idx);
        let layer = self.layer_rect(cell.z as usize);
        let min = layer.min
            + Vec2::new(
                LAYER_PADDING + cell.x as f32 * self.cell_size,
                LAYER_PADDING + cell.y as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    #[inline]
    fn cell_center(&self, idx: usize) -> Pos2 {
        self.cell_rect(idx).center()
    }

    /// Draw one z-layer: background, title and cell grid
    fn draw_layer(&self, painter: &Painter, z: usize) {
        let rect = self.layer_rect(z);
        painter.rect_filled(rect, CornerRadius::same(6), LAYER_BG);
        painter.text(
            Pos2::new(rect.center().x, rect.min.y - 14.0),
            egui::Align2::CENTER_CENTER,
            format!("Layer {}", z + 1),
            egui::FontId::proportional(13.0),
            TEXT_SECONDARY,
        );

        for y in 0..BOARD_SIZE as u8 {
            for x in 0..BOARD_SIZE as u8 {
                let cell = self.cell_rect(Cell::new(x, y, z as u8).to_index()).shrink(2.0);
                painter.rect_filled(cell, CornerRadius::same(4), CELL_BG);
                painter.rect_stroke(
                    cell,
                    CornerRadius::same(4),
                    Stroke::new(1.0, CELL_BORDER),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    /// Draw an X as a cross, an O as a ring
    fn draw_mark(&self, painter: &Painter, idx: usize, mark: Mark, alpha: u8) {
        let center = self.cell_center(idx);
        let r = self.cell_size * MARK_RADIUS_RATIO;

        match mark {
            Mark::X => {
                let color = MARK_X.gamma_multiply(f32::from(alpha) / 255.0);
                let stroke = Stroke::new(MARK_STROKE, color);
                painter.line_segment([center + Vec2::new(-r, -r), center + Vec2::new(r, r)], stroke);
                painter.line_segment([center + Vec2::new(-r, r), center + Vec2::new(r, -r)], stroke);
            }
            Mark::O => {
                let color = MARK_O.gamma_multiply(f32::from(alpha) / 255.0);
                painter.circle_stroke(center, r, Stroke::new(MARK_STROKE, color));
            }
        }
    }

    /// Outline the four cells of the completed line
    fn draw_winning_line(&self, painter: &Painter, mask: u64) {
        let stroke = Stroke::new(3.0, WIN_HIGHLIGHT);
        for idx in (0..64).filter(|&i| mask & (1u64 << i) != 0) {
            painter.rect_stroke(
                self.cell_rect(idx).shrink(1.0),
                CornerRadius::same(5),
                stroke,
                egui::StrokeKind::Inside,
            );
        }
    }

    /// Convert screen coordinates to a cell index
    pub fn screen_to_cell(&self, screen_pos: Pos2) -> Option<usize> {
        (0..BOARD_SIZE)
            .find(|&z| self.layer_rect(z).contains(screen_pos))
            .and_then(|z| {
                let layer = self.layer_rect(z);
                let rel = screen_pos - layer.min - Vec2::splat(LAYER_PADDING);
                let x = (rel.x / self.cell_size).floor() as i32;
                let y = (rel.y / self.cell_size).floor() as i32;
                Cell::try_new(x, y, z as i32).ok().map(Cell::to_index)
            })
    }
}
