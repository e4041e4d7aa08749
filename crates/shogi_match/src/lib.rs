//! Match Runner for ML-shogi
//!
//! Plays engines against each other through the validated game loop and
//! reports the results.
//!
//! # Usage
//!
//! ```bash
//! # Classical engine against the random baseline
//! cargo run -p shogi_match -- --engine1 classical --engine2 random --games 10
//!
//! # Settings from a file, report written as JSON
//! cargo run -p shogi_match -- --config match.toml --output report.json
//! ```

mod config;
mod match_runner;
mod results;

pub use config::*;
pub use match_runner::*;
pub use results::*;
