//! Match runner for playing games between engines

use serde::{Deserialize, Serialize};
use shogi_core::{move_to_usi, Engine, Game, GameResult, Side};
use tracing::{debug, info, warn};

use crate::config::MatchConfig;

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The loser had no legal move.
    NoLegalMoves,
    /// An engine returned no move while it still had legal moves.
    Resigned,
    /// An engine returned a move the rules refused.
    IllegalMove,
    /// `max_moves` plies were played without a result.
    MoveLimit,
}

/// One finished game, from the board's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Index into `MatchReport::engines` of the engine playing First.
    pub first_engine: usize,
    pub winner: Option<Side>,
    pub reason: EndReason,
    /// Moves in USI notation.
    pub moves: Vec<String>,
}

/// Tally from engine1's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    fn record(&mut self, game: &GameRecord) {
        let engine1_side = if game.first_engine == 0 {
            Side::First
        } else {
            Side::Second
        };
        match game.winner {
            Some(side) if side == engine1_side => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the tally from engine1's perspective and every game played.
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> (MatchResult, Vec<GameRecord>) {
        let mut result = MatchResult::new();
        let mut games = Vec::with_capacity(self.config.num_games as usize);

        for game_num in 0..self.config.num_games {
            let engine1_first = !self.config.alternate_sides || game_num % 2 == 0;

            let record = if engine1_first {
                self.play_game(engine1, engine2, 0)
            } else {
                self.play_game(engine2, engine1, 1)
            };
            result.record(&record);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                winner = ?record.winner,
                reason = ?record.reason,
                plies = record.moves.len(),
                wins = result.wins,
                losses = result.losses,
                draws = result.draws,
                "game finished"
            );
            games.push(record);
        }

        (result, games)
    }

    /// Play a single game from the starting position.
    pub fn play_game(&self, first: &mut dyn Engine, second: &mut dyn Engine, first_engine: usize) -> GameRecord {
        let mut game = Game::new();
        first.new_game();
        second.new_game();
        let mut reason = EndReason::MoveLimit;

        while !game.is_over() && (game.moves().len() as u32) < self.config.max_moves {
            let side = game.side_to_move();
            let engine: &mut dyn Engine = match side {
                Side::First => &mut *first,
                Side::Second => &mut *second,
            };

            let search = engine.search(game.position(), self.config.search_limits());
            let Some(mv) = search.best_move else {
                debug!(engine = engine.name(), ?side, "no move returned, resigning");
                game.resign();
                reason = EndReason::Resigned;
                break;
            };

            if let Err(err) = game.play(mv) {
                warn!(engine = engine.name(), ?side, %mv, %err, "engine forfeits on an illegal move");
                game.resign();
                reason = EndReason::IllegalMove;
                break;
            }
        }

        let winner = match game.result() {
            GameResult::Win(side) => Some(side),
            GameResult::InProgress => None,
        };
        if reason == EndReason::MoveLimit && winner.is_some() {
            reason = EndReason::NoLegalMoves;
        }

        GameRecord {
            first_engine,
            winner,
            reason,
            moves: game.moves().iter().map(|&mv| move_to_usi(mv)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
