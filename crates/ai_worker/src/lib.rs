//! Background AI worker.
//!
//! The caller sends an immutable snapshot (`position`, `side`, `depth`) and
//! gets exactly one [`AiResponse`] back. Searches run one at a time on tokio's
//! blocking pool, so an async caller (a UI, a server) never stalls on them.

use std::sync::{Arc, Mutex};

use classical_engine::ClassicalEngine;
use serde::{Deserialize, Serialize};
use shogi_core::{Engine, Move, Position, SearchLimits, Side, TimeControl};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Pending requests beyond the one being searched.
const QUEUE_DEPTH: usize = 16;

/// A search request. The position is owned by the request; the worker never
/// sees the caller's live game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRequest {
    pub position: Position,
    /// Side to search for. Overrides `position.side_to_move`.
    pub side: Side,
    pub depth: u8,
}

impl AiRequest {
    pub fn new(position: Position, side: Side, depth: u8) -> Self {
        Self {
            position,
            side,
            depth,
        }
    }

    /// Search for whoever is to move in `position`.
    pub fn for_side_to_move(position: Position, depth: u8) -> Self {
        let side = position.side_to_move;
        Self::new(position, side, depth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiResponse {
    BestMove(Move),
    /// Depth 0, or the side has no legal move.
    NoMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    #[error("the AI worker has shut down")]
    Closed,
    #[error("search task failed: {0}")]
    SearchFailed(String),
}

struct Job {
    request: AiRequest,
    stop: TimeControl,
    reply: oneshot::Sender<Result<AiResponse, WorkerError>>,
}

/// Stop flags of the requests still waiting for a reply, queued or searching.
#[derive(Debug, Clone, Default)]
struct Pending(Arc<Mutex<Vec<TimeControl>>>);

impl Pending {
    fn register(&self) -> PendingGuard<'_> {
        let stop = TimeControl::new();
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(stop.clone());
        PendingGuard {
            pending: self,
            stop,
        }
    }

    fn stop_all(&self) {
        for stop in self.0.lock().unwrap_or_else(|e| e.into_inner()).iter() {
            stop.stop();
        }
    }
}

/// Unregisters a request once its caller stops waiting.
struct PendingGuard<'a> {
    pending: &'a Pending,
    stop: TimeControl,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|stop| !stop.same_flag(&self.stop));
    }
}

/// Handle to the worker task. Dropping it closes the request channel; the task
/// finishes the search in progress and exits.
#[derive(Debug)]
pub struct AiWorker {
    requests: mpsc::Sender<Job>,
    pending: Pending,
    task: JoinHandle<()>,
}

impl AiWorker {
    /// Starts the worker on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn() -> Self {
        let (requests, rx) = mpsc::channel(QUEUE_DEPTH);
        let task = tokio::spawn(run(rx));
        Self {
            requests,
            pending: Pending::default(),
            task,
        }
    }

    /// Queues a request and waits for its answer.
    pub async fn think(&self, request: AiRequest) -> Result<AiResponse, WorkerError> {
        let guard = self.pending.register();
        let (reply, answer) = oneshot::channel();
        let stop = guard.stop.clone();
        self.requests
            .send(Job {
                request,
                stop,
                reply,
            })
            .await
            .map_err(|_| WorkerError::Closed)?;
        answer.await.map_err(|_| WorkerError::Closed)?
    }

    /// Stops every request not yet answered: the search in progress halts
    /// at its next root move and queued requests stop before their first.
    /// Each reply still arrives, carrying the best move among the root moves
    /// already scored, or the first ordered move if none was. Requests sent
    /// after the call are not affected.
    pub fn cancel(&self) {
        self.pending.stop_all();
    }

    /// Closes the channel and waits for the worker task to exit.
    pub async fn shutdown(self) {
        let Self { requests, task, .. } = self;
        drop(requests);
        if let Err(err) = task.await {
            warn!(%err, "AI worker task ended abnormally");
        }
    }
}

async fn run(mut rx: mpsc::Receiver<Job>) {
    while let Some(Job {
        request,
        stop,
        reply,
    }) = rx.recv().await
    {
        let result = tokio::task::spawn_blocking(move || search(request, stop))
            .await
            .map_err(|err| WorkerError::SearchFailed(err.to_string()));
        if reply.send(result).is_err() {
            debug!("requester dropped before the reply");
        }
    }
    debug!("AI worker shutting down");
}

fn search(request: AiRequest, stop: TimeControl) -> AiResponse {
    let AiRequest {
        mut position,
        side,
        depth,
    } = request;
    position.side_to_move = side;

    let limits = SearchLimits::with_control(depth, stop);
    match ClassicalEngine::new().search(&position, limits).best_move {
        Some(mv) => AiResponse::BestMove(mv),
        None => AiResponse::NoMove,
    }
}
