//! Move request / response messages
//!
//! JSON shape, one response per request with the same `id`:
//!
//! ```text
//! request:  { "id": 7, "marksA": 7, "marksB": 0, "sideToMove": 1, "difficulty": 0 }
//! response: { "id": 7, "move": 3 }
//!           { "id": 7, "move": null }          board full
//!           { "id": 7, "error": "..." }
//! ```
//!
//! Side and difficulty travel as raw tags and are only decoded when the
//! request is served, so a bad tag comes back as an error response instead
//! of being lost.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::engine::Difficulty;
use crate::error::EngineError;

/// Monotonically increasing request identifier
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub id: RequestId,
    /// Cells held by X
    pub marks_a: u64,
    /// Cells held by O
    pub marks_b: u64,
    /// [`Mark::tag`] of the side to move
    pub side_to_move: u8,
    /// [`Difficulty::tag`] of the requested tier
    pub difficulty: u8,
}

impl MoveRequest {
    pub fn new(id: RequestId, board: &Board, side: Mark, difficulty: Difficulty) -> Self {
        let (marks_a, marks_b) = board.masks();
        Self {
            id,
            marks_a,
            marks_b,
            side_to_move: side.tag(),
            difficulty: difficulty.tag(),
        }
    }

    /// Validate the payload back into engine types.
    pub fn decode(&self) -> Result<(Board, Mark, Difficulty), EngineError> {
        let board = Board::from_masks(self.marks_a, self.marks_b)?;
        let side = Mark::from_tag(self.side_to_move)?;
        let difficulty = Difficulty::from_tag(self.difficulty)?;
        Ok((board, side, difficulty))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Payload of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    /// Chosen cell, `None` when the board is full
    Move(Option<usize>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub id: RequestId,
    #[serde(flatten)]
    pub reply: Reply,
}

impl MoveResponse {
    pub fn with_move(id: RequestId, mov: Option<usize>) -> Self {
        Self {
            id,
            reply: Reply::Move(mov),
        }
    }

    pub fn with_error(id: RequestId, err: &EngineError) -> Self {
        Self {
            id,
            reply: Reply::Error(err.to_string()),
        }
    }

    /// The chosen cell, if this response carries one
    #[inline]
    pub fn best_move(&self) -> Option<usize> {
        match self.reply {
            Reply::Move(mov) => mov,
            Reply::Error(_) => None,
        }
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }
}
