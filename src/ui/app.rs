//! Main application for the qubic GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use crate::board::Mark;
use crate::config::AppConfig;
use crate::engine::Difficulty;
use crate::offload::{open_service, ServiceKind};
use crate::rules::GameOutcome;

use super::board_view::BoardView;
use super::game_state::GameState;
use super::theme::*;

/// Main qubic application
pub struct QubicApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl QubicApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let service = open_service(&config.engine);
        Self {
            state: GameState::new(service, &config.ui),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.state.reset();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Play as X").clicked() {
                        self.state.set_human_mark(Mark::X);
                        ui.close_menu();
                    }
                    if ui.button("Play as O").clicked() {
                        self.state.set_human_mark(Mark::O);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "You: {:?} - {}",
                        self.state.human_mark, self.state.difficulty
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("QUBIC").size(22.0).strong().color(TEXT_PRIMARY));
                });
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("4x4x4 tic-tac-toe").size(11.0).color(TEXT_MUTED));
                });
                ui.add_space(12.0);

                self.render_status_card(ui);
                ui.add_space(10.0);

                self.render_settings_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(msg) = self.state.message.clone() {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, &msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn mark_color(mark: Mark) -> egui::Color32 {
        match mark {
            Mark::X => MARK_X,
            Mark::O => MARK_O,
        }
    }

    /// Turn indicator or game result
    fn render_status_card(&mut self, ui: &mut egui::Ui) {
        let outcome = self.state.outcome();
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("STATUS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match outcome {
                GameOutcome::Ongoing => {
                    let turn = self.state.game.current();
                    ui.label(
                        RichText::new(format!("{:?} to move", turn))
                            .size(18.0)
                            .strong()
                            .color(Self::mark_color(turn)),
                    );
                    let (text, color) = if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                        (format!("AI thinking... {:.1}s", elapsed.as_secs_f32()), STATUS_WAIT)
                    } else if self.state.is_human_turn() {
                        ("Your turn".to_string(), STATUS_OK)
                    } else {
                        ("Waiting for AI".to_string(), STATUS_WAIT)
                    };
                    ui.label(RichText::new(text).size(12.0).color(color));
                }
                GameOutcome::Draw => {
                    ui.label(RichText::new("Draw").size(18.0).strong().color(TEXT_PRIMARY));
                }
                GameOutcome::WinFor { mark, .. } => {
                    ui.label(
                        RichText::new(format!("{:?} wins!", mark))
                            .size(18.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                }
            }

            ui.add_space(8.0);
            if ui.button("New Game").clicked() {
                self.state.reset();
            }
        });
    }

    /// Difficulty and side selection
    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SETTINGS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                for d in Difficulty::ALL {
                    ui.selectable_value(&mut self.state.difficulty, d, d.to_string());
                }
            });

            ui.add_space(4.0);
            let mut human = self.state.human_mark;
            ui.horizontal(|ui| {
                ui.label(RichText::new("You play").size(11.0).color(TEXT_SECONDARY));
                ui.selectable_value(&mut human, Mark::X, "X");
                ui.selectable_value(&mut human, Mark::O, "O");
            });
            self.state.set_human_mark(human);
        });
    }

    /// Last engine answer and backend
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let backend = match self.state.service_kind() {
                ServiceKind::Worker => "worker thread",
                ServiceKind::Direct => "direct call",
            };
            ui.label(RichText::new(format!("Backend: {}", backend)).size(10.0).color(TEXT_SECONDARY));

            match (self.state.last_ai_move, self.state.last_ai_time) {
                (Some(idx), Some(time)) => {
                    let cell = crate::board::Cell::from_index(idx);
                    ui.label(
                        RichText::new(format!(
                            "-> cell {} ({}, {}, {})",
                            idx, cell.x, cell.y, cell.z
                        ))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                    );
                    ui.label(
                        RichText::new(format!("{}ms", time.as_millis()))
                            .size(10.0)
                            .color(TEXT_SECONDARY),
                    );
                }
                _ => {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let outcome = self.state.outcome();
            let accept_input = !outcome.is_over()
                && self.state.is_human_turn()
                && !self.state.is_ai_thinking();

            let clicked = self.board_view.show(
                ui,
                self.state.game.board(),
                self.state.game.current(),
                self.state.game.last_move(),
                outcome.winning_line(),
                accept_input,
            );

            if let Some(idx) = clicked {
                if let Err(msg) = self.state.try_play(idx) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, new_game) = ctx.input(|i| (i.key_pressed(egui::Key::D), i.key_pressed(egui::Key::N)));
        if debug {
            self.show_debug = !self.show_debug;
        }
        if new_game {
            self.state.reset();
        }
    }
}

impl eframe::App for QubicApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        self.state.start_ai_thinking();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
