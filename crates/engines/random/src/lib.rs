//! Random Move Shogi Engine
//!
//! Picks uniformly among the legal moves, drops included. Useful as a
//! baseline opponent and for stress testing the rules in self-play.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shogi_core::{legal_moves_into, Engine, Position, SearchLimits, SearchResult};


/// A shogi engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    nodes: u64,
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move choices, for matches that must replay exactly.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            nodes: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        if limits.depth == 0 {
            return SearchResult::no_move(0);
        }

        let mut moves = Vec::with_capacity(128);
        legal_moves_into(pos, pos.side_to_move, &mut moves);
        self.nodes = 1;

        SearchResult {
            best_move: moves.choose(&mut self.rng).copied(),
            score: 0,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
