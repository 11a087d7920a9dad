//! Background-thread move service

use std::io;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::board::{Board, Mark};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, Difficulty};

use super::pending::PendingTable;
use super::protocol::{MoveRequest, MoveResponse, RequestId};
use super::{respond, MoveService, ServiceKind};

/// Serves requests on a dedicated thread.
///
/// Dropping the service closes the request channel; the thread finishes
/// the search it is on, if any, and exits. If the thread dies, requests in
/// flight are treated as cancelled and later requests are served on the
/// caller's thread.
pub struct WorkerService {
    engine: AIEngine,
    pending: PendingTable,
    link: Option<WorkerLink>,
    /// Responses produced on the caller thread after the worker died
    fallback: Vec<MoveResponse>,
}

struct WorkerLink {
    requests: Sender<MoveRequest>,
    responses: Receiver<MoveResponse>,
    _handle: JoinHandle<()>,
}

impl WorkerService {
    /// Start the worker thread.
    pub fn spawn(config: EngineConfig) -> io::Result<Self> {
        let (req_tx, req_rx) = channel::<MoveRequest>();
        let (resp_tx, resp_rx) = channel::<MoveResponse>();
        let engine = AIEngine::with_config(config);
        let worker_engine = engine.clone();

        let handle = thread::Builder::new()
            .name("qubic-move-worker".into())
            .spawn(move || {
                log::info!("move worker started");
                while let Ok(request) = req_rx.recv() {
                    let response = respond(&worker_engine, &request);
                    if resp_tx.send(response).is_err() {
                        break;
                    }
                }
                log::info!("move worker stopped");
            })?;

        Ok(Self {
            engine,
            pending: PendingTable::new(),
            link: Some(WorkerLink {
                requests: req_tx,
                responses: resp_rx,
                _handle: handle,
            }),
            fallback: Vec::new(),
        })
    }

    /// Whether the worker thread is still reachable
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.link.is_some()
    }

    /// Answer on the caller thread; handed out by the next `poll`.
    fn serve_locally(&mut self, request: MoveRequest) -> RequestId {
        self.fallback.push(respond(&self.engine, &request));
        request.id
    }

    fn lose_worker(&mut self) {
        if self.link.take().is_some() {
            let dropped = self.pending.cancel_all();
            log::warn!(
                "move worker disconnected, {} request(s) cancelled, continuing on caller thread",
                dropped
            );
        }
    }
}

impl MoveService for WorkerService {
    fn request_move(&mut self, board: &Board, side: Mark, difficulty: Difficulty) -> RequestId {
        let id = self.pending.issue();
        let request = MoveRequest::new(id, board, side, difficulty);

        let Some(link) = &self.link else {
            return self.serve_locally(request);
        };
        let request = match link.requests.send(request) {
            Ok(()) => return id,
            Err(returned) => returned.0,
        };

        // Every id in flight, this one included, went down with the worker
        self.lose_worker();
        let id = self.pending.issue();
        self.serve_locally(MoveRequest { id, ..request })
    }

    fn poll(&mut self) -> Vec<MoveResponse> {
        let mut arrived = std::mem::take(&mut self.fallback);
        let mut disconnected = false;

        if let Some(link) = &self.link {
            loop {
                match link.responses.try_recv() {
                    Ok(response) => arrived.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let resolved = arrived
            .into_iter()
            .filter_map(|resp| self.pending.resolve(resp))
            .collect();
        if disconnected {
            self.lose_worker();
        }
        resolved
    }

    fn cancel_all(&mut self) {
        let n = self.pending.cancel_all();
        if n > 0 {
            log::debug!("cancelled {} in-flight move request(s)", n);
        }
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Worker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offload::DirectService;
    use std::time::{Duration, Instant};

    fn config() -> EngineConfig {
        EngineConfig {
            hard_depth: 2,
            tt_size_mb: 1,
            use_worker: true,
            seed: Some(2024),
        }
    }

    /// Poll until `count` responses arrive or the timeout passes.
    fn collect(service: &mut dyn MoveService, count: usize) -> Vec<MoveResponse> {
        let deadline = Instant::now() + Duration::from_secs(20);
        let mut out = Vec::new();
        while out.len() < count && Instant::now() < deadline {
            out.extend(service.poll());
            thread::sleep(Duration::from_millis(2));
        }
        out
    }

    fn positions() -> Vec<(Board, Mark, Difficulty)> {
        let mut mid = Board::new();
        for (idx, mark) in [(0, Mark::X), (21, Mark::O), (42, Mark::X), (5, Mark::O)] {
            mid.place(idx, mark).unwrap();
        }
        vec![
            (Board::new(), Mark::X, Difficulty::Easy),
            (mid, Mark::X, Difficulty::Easy),
            (mid, Mark::X, Difficulty::Medium),
            (mid, Mark::X, Difficulty::Hard),
        ]
    }

    #[test]
    fn test_worker_matches_direct() {
        let mut worker = WorkerService::spawn(config()).unwrap();
        let mut direct = DirectService::new(config());

        let mut ids = Vec::new();
        for (board, side, difficulty) in positions() {
            let a = worker.request_move(&board, side, difficulty);
            let b = direct.request_move(&board, side, difficulty);
            assert_eq!(a, b);
            ids.push(a);
        }

        let mut from_worker = collect(&mut worker, ids.len());
        let mut from_direct = direct.poll();
        from_worker.sort_by_key(|r| r.id);
        from_direct.sort_by_key(|r| r.id);

        assert_eq!(from_worker.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
        assert_eq!(from_worker, from_direct);
        assert_eq!(worker.pending(), 0);
    }

    #[test]
    fn test_worker_cancel_drops_late_response() {
        let mut worker = WorkerService::spawn(config()).unwrap();
        worker.request_move(&Board::new(), Mark::X, Difficulty::Medium);
        worker.cancel_all();
        assert_eq!(worker.pending(), 0);

        // A fresh request still gets exactly its own answer
        let id = worker.request_move(&Board::new(), Mark::O, Difficulty::Medium);
        let responses = collect(&mut worker, 1);
        thread::sleep(Duration::from_millis(20));
        let late = worker.poll();
        assert_eq!(responses.len() + late.len(), 1);
        assert_eq!(responses[0].id, id);
    }

    /// Replace the worker with one that never answers. With `accept` the
    /// request channel stays open, so sends succeed but responses never come.
    fn sever(worker: &mut WorkerService, accept: bool) -> Option<Receiver<MoveRequest>> {
        let (req_tx, req_rx) = channel::<MoveRequest>();
        let (_, resp_rx) = channel::<MoveResponse>();
        worker.link = Some(WorkerLink {
            requests: req_tx,
            responses: resp_rx,
            _handle: thread::spawn(|| {}),
        });
        accept.then_some(req_rx)
    }

    #[test]
    fn test_worker_death_cancels_in_flight() {
        let mut worker = WorkerService::spawn(config()).unwrap();
        let _inbox = sever(&mut worker, true);

        worker.request_move(&Board::new(), Mark::X, Difficulty::Easy);
        assert_eq!(worker.pending(), 1);
        assert!(worker.poll().is_empty());
        assert!(!worker.is_alive());
        assert_eq!(worker.pending(), 0);

        // Served on the caller thread from now on, each under its own id
        for side in [Mark::X, Mark::O, Mark::X] {
            let id = worker.request_move(&Board::new(), side, Difficulty::Medium);
            let responses = worker.poll();
            assert_eq!(responses.len(), 1);
            assert_eq!(responses[0].id, id);
            assert_eq!(worker.pending(), 0);
        }
    }

    #[test]
    fn test_worker_failed_send_answers_once() {
        let mut worker = WorkerService::spawn(config()).unwrap();
        assert!(sever(&mut worker, false).is_none());

        let id = worker.request_move(&Board::new(), Mark::X, Difficulty::Medium);
        assert!(!worker.is_alive());
        assert_eq!(worker.pending(), 1);
        let responses = worker.poll();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, id);
        assert_eq!(worker.pending(), 0);

        let id = worker.request_move(&Board::new(), Mark::O, Difficulty::Easy);
        assert_eq!(worker.pending(), 1);
        let responses = worker.poll();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, id);
        assert_eq!(worker.pending(), 0);
    }

    #[test]
    fn test_worker_is_alive() {
        let worker = WorkerService::spawn(config()).unwrap();
        assert!(worker.is_alive());
        assert_eq!(worker.kind(), ServiceKind::Worker);
    }
}
