//! Off-thread move requests
//!
//! A caller hands a position to a [`MoveService`] and keeps running; the
//! answer is collected later with [`MoveService::poll`]. Two services share
//! the contract:
//!
//! - [`WorkerService`]: searches on a background thread
//! - [`DirectService`]: searches synchronously inside `request_move`
//!
//! [`open_service`] picks one once at startup. Both serve a request through
//! [`respond`], so the same request gets the same move from either.
//!
//! # Example
//!
//! ```
//! use qubic::board::{Board, Mark};
//! use qubic::config::EngineConfig;
//! use qubic::engine::Difficulty;
//! use qubic::offload::{DirectService, MoveService};
//!
//! let mut service = DirectService::new(EngineConfig::default());
//! let mut board = Board::new();
//! for idx in [0, 1, 2] {
//!     board.place(idx, Mark::O).unwrap();
//! }
//!
//! let id = service.request_move(&board, Mark::O, Difficulty::Medium);
//! let responses = service.poll();
//! assert_eq!(responses[0].id, id);
//! assert_eq!(responses[0].best_move(), Some(3));
//! ```

pub mod direct;
pub mod pending;
pub mod protocol;
pub mod worker;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Mark};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, Difficulty};
use crate::error::EngineError;

pub use direct::DirectService;
pub use pending::PendingTable;
pub use protocol::{MoveRequest, MoveResponse, Reply, RequestId};
pub use worker::WorkerService;

/// Which backend is serving requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Worker,
    Direct,
}

/// Request/response channel to the move engine.
pub trait MoveService {
    /// Send a request and return its id without waiting for the answer.
    fn request_move(&mut self, board: &Board, side: Mark, difficulty: Difficulty) -> RequestId;

    /// Collect responses that have arrived since the last call. Never blocks.
    /// Only responses to requests still in flight are returned.
    fn poll(&mut self) -> Vec<MoveResponse>;

    /// Forget every request in flight; their responses will be dropped.
    fn cancel_all(&mut self);

    /// Number of requests still waiting for a response
    fn pending(&self) -> usize;

    fn kind(&self) -> ServiceKind;
}

/// Open the configured service, falling back to [`DirectService`] when a
/// worker is disabled or cannot be started.
pub fn open_service(config: &EngineConfig) -> Box<dyn MoveService> {
    if config.use_worker {
        match WorkerService::spawn(config.clone()) {
            Ok(worker) => return Box::new(worker),
            Err(e) => log::warn!("move worker unavailable ({}), searching on the caller thread", e),
        }
    }
    log::info!("using direct move service");
    Box::new(DirectService::new(config.clone()))
}

/// Generator for one request: seeded from `seed` and the request id when a
/// seed is configured, from the OS otherwise.
pub(crate) fn request_rng(seed: Option<u64>, id: RequestId) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ id.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        None => StdRng::from_os_rng(),
    }
}

/// Serve one request. Exactly one response comes back, with the same id.
pub fn respond(engine: &AIEngine, request: &MoveRequest) -> MoveResponse {
    match request.decode() {
        Ok((board, side, difficulty)) => {
            let mut rng = request_rng(engine.config().seed, request.id);
            let mov = engine.choose_move(&board, side, difficulty, &mut rng);
            MoveResponse::with_move(request.id, mov)
        }
        Err(e) => {
            log::warn!("rejecting request {}: {}", request.id, e);
            MoveResponse::with_error(request.id, &e)
        }
    }
}

/// Serve one JSON-encoded request and encode the response.
///
/// Fails only when the text is not a request at all; a request with bad
/// contents gets an error response.
pub fn respond_json(engine: &AIEngine, text: &str) -> Result<String, EngineError> {
    let request = MoveRequest::from_json(text)?;
    respond(engine, &request).to_json()
}
