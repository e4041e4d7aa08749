pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod sfen;
pub mod time_control;
pub mod types;
pub mod usi;

// Re-export core game logic (not engine-specific)
pub use attacks::{is_attacked, is_square_attacked};
pub use board::*;
pub use error::*;
pub use game::{Game, GameResult};
pub use movegen::*;
pub use perft::{divide, perft};
pub use sfen::STARTPOS_SFEN;
pub use time_control::*;
pub use types::*;
pub use usi::*;

// =============================================================================
// Engine trait, implemented by every computer opponent
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves, or depth 0)
    pub best_move: Option<Move>,
    /// Evaluation of the best move from the searching side's perspective
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search was interrupted before every root move was scored
    pub stopped: bool,
}

impl SearchResult {
    /// The explicit "no move" answer.
    pub fn no_move(depth: u8) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all shogi engines implement.
///
/// An engine picks a move for `pos.side_to_move`. It must treat `pos` as an
/// immutable snapshot: all exploration happens on copies.
pub trait Engine: Send {
    /// Search the position within the given limits.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for USI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for USI identification
    fn author(&self) -> &str {
        "ML-shogi"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a USI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
