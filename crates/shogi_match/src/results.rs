//! Match report storage and text summary

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::match_runner::{GameRecord, MatchResult};

/// Everything a finished match produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Engine names as given in the config; engine1 first
    pub engines: [String; 2],
    pub config: MatchConfig,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchReport {
    pub fn new(config: MatchConfig, result: MatchResult, games: Vec<GameRecord>) -> Self {
        Self {
            engines: config.engines.clone(),
            config,
            result,
            games,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Generate a text summary
    pub fn summary(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Match: {} vs {} ===\n",
            self.engines[0], self.engines[1]
        ));
        report.push_str(&format!(
            "Config: {} games, depth {}, max {} plies\n\n",
            self.config.num_games, self.config.depth, self.config.max_moves
        ));
        for (i, game) in self.games.iter().enumerate() {
            let outcome = match game.winner {
                Some(side) => format!("{side:?} wins"),
                None => "draw".to_string(),
            };
            report.push_str(&format!(
                "Game {:>3}: {:<12} (First: {:<10}) {:?} after {} plies\n",
                i + 1,
                outcome,
                self.engines[game.first_engine],
                game.reason,
                game.moves.len()
            ));
        }
        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws (score {:.1}%)\n",
            self.engines[0],
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        ));
        report
    }
}
