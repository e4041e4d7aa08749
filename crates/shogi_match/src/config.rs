//! Match configuration, read from TOML.

use std::path::{Path, PathBuf};

use classical_engine::ClassicalEngine;
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use shogi_core::{Engine, SearchLimits, DEFAULT_DEPTH};
use thiserror::Error;

/// Deepest search the runner accepts; deeper fixed-depth searches take minutes
/// per move.
pub const MAX_DEPTH: u8 = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid match config")]
    Parse(#[from] toml::de::Error),
    #[error("unknown engine {0:?} (expected `classical`, `random` or `random:<seed>`)")]
    UnknownEngine(String),
    #[error("{0}")]
    Invalid(String),
}

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Search depth for engines
    pub depth: u8,
    /// Plies per game before declaring a draw
    pub max_moves: u32,
    /// Whether the engines swap sides every game
    pub alternate_sides: bool,
    /// The two engines, as `classical`, `random` or `random:<seed>`
    pub engines: [String; 2],
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: DEFAULT_DEPTH,
            max_moves: 256,
            alternate_sides: true,
            engines: ["classical".to_string(), "random".to_string()],
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_games == 0 {
            return Err(ConfigError::Invalid("num_games must be at least 1".into()));
        }
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(ConfigError::Invalid(format!(
                "depth must be between 1 and {MAX_DEPTH}, got {}",
                self.depth
            )));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::Invalid("max_moves must be at least 1".into()));
        }
        for spec in &self.engines {
            create_engine(spec)?;
        }
        Ok(())
    }

    /// Fresh limits for one move, so every search gets its own clock.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits::depth(self.depth)
    }
}

/// Builds an engine from its name.
pub fn create_engine(spec: &str) -> Result<Box<dyn Engine>, ConfigError> {
    let (name, arg) = match spec.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (spec, None),
    };
    match (name.to_lowercase().as_str(), arg) {
        ("classical" | "classic", None) => Ok(Box::new(ClassicalEngine::new())),
        ("random", None) => Ok(Box::new(RandomEngine::new())),
        ("random", Some(seed)) => seed
            .parse()
            .map(|seed| Box::new(RandomEngine::with_seed(seed)) as Box<dyn Engine>)
            .map_err(|_| ConfigError::UnknownEngine(spec.to_string())),
        _ => Err(ConfigError::UnknownEngine(spec.to_string())),
    }
}
