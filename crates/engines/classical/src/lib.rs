//! Classical Shogi Engine
//!
//! Fixed-depth alpha-beta search over a hand-tuned static evaluation.

mod eval;
mod search;

use shogi_core::{Engine, Position, SearchLimits, SearchResult};
use tracing::debug;

/// Classical shogi engine: minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Fixed-depth search, no iterative deepening or transposition table
/// - Captures and promotions searched first
/// - Material, promotion, advancement, king shelter and hand evaluation
/// - A stop flag checked between root moves
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        limits.start();

        let outcome = search::pick_best_move(pos, limits.depth, &mut self.nodes, &limits.time_control);

        let result = SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: limits.depth,
            nodes: self.nodes,
            stopped: outcome.stopped,
        };
        debug!(
            side = ?pos.side_to_move,
            depth = result.depth,
            nodes = result.nodes,
            score = result.score,
            best = ?result.best_move.map(|mv| mv.to_string()),
            stopped = result.stopped,
            elapsed_ms = limits.time_control.elapsed().as_millis() as u64,
            "search finished"
        );
        result
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

pub use eval::{evaluate, piece_value, PIECE_VALUES};
pub use search::{order_moves, pick_best_move, SearchOutcome, MATE_SCORE, PROMOTION_BONUS};
