//! GUI module for the qubic game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::QubicApp;
pub use game_state::{AiState, GameState};
