//! Synchronous move service

use std::collections::VecDeque;

use crate::board::{Board, Mark};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, Difficulty};

use super::pending::PendingTable;
use super::protocol::{MoveRequest, MoveResponse, RequestId};
use super::{respond, MoveService, ServiceKind};

/// Searches on the caller's thread inside `request_move`; the response is
/// handed out by the next `poll`.
pub struct DirectService {
    engine: AIEngine,
    pending: PendingTable,
    ready: VecDeque<MoveResponse>,
}

impl DirectService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: AIEngine::with_config(config),
            pending: PendingTable::new(),
            ready: VecDeque::new(),
        }
    }
}

impl MoveService for DirectService {
    fn request_move(&mut self, board: &Board, side: Mark, difficulty: Difficulty) -> RequestId {
        let id = self.pending.issue();
        let request = MoveRequest::new(id, board, side, difficulty);
        self.ready.push_back(respond(&self.engine, &request));
        id
    }

    fn poll(&mut self) -> Vec<MoveResponse> {
        let pending = &mut self.pending;
        self.ready
            .drain(..)
            .filter_map(|resp| pending.resolve(resp))
            .collect()
    }

    fn cancel_all(&mut self) {
        self.pending.cancel_all();
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_one_response_per_request() {
        let mut service = DirectService::new(EngineConfig::default());
        let a = service.request_move(&Board::new(), Mark::X, Difficulty::Medium);
        let b = service.request_move(&Board::new(), Mark::O, Difficulty::Medium);
        assert_eq!(service.pending(), 2);

        let ids: Vec<_> = service.poll().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(service.pending(), 0);
        assert!(service.poll().is_empty());
    }

    #[test]
    fn test_direct_cancel_drops_response() {
        let mut service = DirectService::new(EngineConfig::default());
        service.request_move(&Board::new(), Mark::X, Difficulty::Medium);
        service.cancel_all();
        assert!(service.poll().is_empty());
    }
}
