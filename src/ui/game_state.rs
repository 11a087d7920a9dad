//! Game state management for the qubic GUI

use std::time::{Duration, Instant};

use crate::board::Mark;
use crate::config::UiConfig;
use crate::engine::Difficulty;
use crate::error::EngineError;
use crate::game::Game;
use crate::offload::{MoveService, Reply, RequestId, ServiceKind};
use crate::rules::GameOutcome;

/// AI computation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Thinking { id: RequestId, start_time: Instant },
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub human_mark: Mark,
    pub difficulty: Difficulty,
    pub ai_state: AiState,
    pub last_ai_move: Option<usize>,
    pub last_ai_time: Option<Duration>,
    pub message: Option<String>,
    service: Box<dyn MoveService>,
}

impl GameState {
    pub fn new(service: Box<dyn MoveService>, ui: &UiConfig) -> Self {
        Self {
            game: Game::new(),
            human_mark: ui.human_mark,
            difficulty: ui.difficulty,
            ai_state: AiState::Idle,
            last_ai_move: None,
            last_ai_time: None,
            message: None,
            service,
        }
    }

    /// Start over. A search still running for the old game is abandoned and
    /// its answer will be dropped.
    pub fn reset(&mut self) {
        self.service.cancel_all();
        self.game.reset();
        self.ai_state = AiState::Idle;
        self.last_ai_move = None;
        self.last_ai_time = None;
        self.message = None;
    }

    pub fn set_human_mark(&mut self, mark: Mark) {
        if self.human_mark != mark {
            self.human_mark = mark;
            self.reset();
        }
    }

    #[inline]
    pub fn service_kind(&self) -> ServiceKind {
        self.service.kind()
    }

    #[inline]
    pub fn outcome(&self) -> GameOutcome {
        self.game.outcome()
    }

    pub fn is_human_turn(&self) -> bool {
        self.game.current() == self.human_mark
    }

    pub fn is_ai_turn(&self) -> bool {
        self.game.current() != self.human_mark
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Place the human's mark at `idx`.
    pub fn try_play(&mut self, idx: usize) -> Result<(), String> {
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.game.play(idx).map_err(|e| describe(&e))?;
        self.message = None;
        Ok(())
    }

    /// Send a move request if the engine is to move and nothing is in flight.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game.is_over() {
            return;
        }
        let id = self
            .service
            .request_move(self.game.board(), self.game.current(), self.difficulty);
        self.ai_state = AiState::Thinking {
            id,
            start_time: Instant::now(),
        };
    }

    /// Apply the engine's answer if it has arrived.
    pub fn check_ai_result(&mut self) {
        let AiState::Thinking { id, start_time } = self.ai_state else {
            // Answers to abandoned requests were cancelled; drain them
            let _ = self.service.poll();
            return;
        };

        for response in self.service.poll() {
            if response.id != id {
                continue;
            }
            self.ai_state = AiState::Idle;
            self.last_ai_time = Some(start_time.elapsed());

            match response.reply {
                Reply::Move(Some(idx)) => match self.game.play(idx) {
                    Ok(_) => self.last_ai_move = Some(idx),
                    Err(e) => self.message = Some(describe(&e)),
                },
                Reply::Move(None) => self.message = Some("AI found no move".to_string()),
                Reply::Error(e) => self.message = Some(format!("AI error: {}", e)),
            }
            return;
        }

        if self.service.pending() == 0 {
            // Request lost with its worker: ask again next frame
            self.ai_state = AiState::Idle;
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }
}

fn describe(err: &EngineError) -> String {
    match err {
        EngineError::CellOccupied(_) => "Cell is taken".to_string(),
        EngineError::GameOver => "Game is over".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::offload::DirectService;

    fn state(human: Mark, difficulty: Difficulty) -> GameState {
        let config = EngineConfig {
            hard_depth: 2,
            tt_size_mb: 1,
            use_worker: false,
            seed: Some(9),
        };
        let ui = UiConfig {
            difficulty,
            human_mark: human,
        };
        GameState::new(Box::new(DirectService::new(config)), &ui)
    }

    #[test]
    fn test_human_then_ai() {
        let mut gs = state(Mark::X, Difficulty::Medium);
        assert!(gs.is_human_turn());
        gs.try_play(0).unwrap();
        assert!(gs.is_ai_turn());

        gs.start_ai_thinking();
        assert!(gs.is_ai_thinking());
        gs.check_ai_result();

        assert!(!gs.is_ai_thinking());
        let mov = gs.last_ai_move.unwrap();
        assert_eq!(gs.game.board().get(mov), Some(Mark::O));
        assert!(gs.is_human_turn());
    }

    #[test]
    fn test_ai_moves_first_as_x() {
        let mut gs = state(Mark::O, Difficulty::Easy);
        gs.start_ai_thinking();
        gs.check_ai_result();
        assert_eq!(gs.game.board().mark_count(), 1);
        assert!(gs.is_human_turn());
    }

    #[test]
    fn test_reset_discards_in_flight() {
        let mut gs = state(Mark::O, Difficulty::Medium);
        gs.start_ai_thinking();
        gs.reset();
        gs.check_ai_result();
        assert!(gs.game.board().is_board_empty());
        assert!(!gs.is_ai_thinking());
    }

    #[test]
    fn test_rejects_play_out_of_turn() {
        let mut gs = state(Mark::O, Difficulty::Medium);
        assert!(gs.try_play(0).is_err());
        gs.start_ai_thinking();
        assert!(gs.try_play(5).is_err());
    }

    #[test]
    fn test_switch_mark_restarts() {
        let mut gs = state(Mark::X, Difficulty::Medium);
        gs.try_play(21).unwrap();
        gs.set_human_mark(Mark::O);
        assert!(gs.game.board().is_board_empty());
        assert!(gs.is_ai_turn());
    }
}
