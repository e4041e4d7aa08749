//! Match CLI
//!
//! Plays two engines against each other and prints (or saves) the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shogi_match::{create_engine, MatchConfig, MatchReport, MatchRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shogi_match", about = "ML-shogi match runner")]
struct Args {
    /// TOML file with match settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// First engine: classical, random or random:<seed>
    #[arg(long)]
    engine1: Option<String>,
    /// Second engine
    #[arg(long)]
    engine2: Option<String>,
    /// Number of games
    #[arg(short, long)]
    games: Option<u32>,
    /// Search depth in plies
    #[arg(short, long)]
    depth: Option<u8>,
    /// Plies per game before declaring a draw
    #[arg(long)]
    max_moves: Option<u32>,
    /// Keep engine1 on the First side every game
    #[arg(long)]
    no_alternate: bool,
    /// Write the JSON report here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(MatchConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(e) = self.engine1 {
            config.engines[0] = e;
        }
        if let Some(e) = self.engine2 {
            config.engines[1] = e;
        }
        if let Some(n) = self.games {
            config.num_games = n;
        }
        if let Some(d) = self.depth {
            config.depth = d;
        }
        if let Some(m) = self.max_moves {
            config.max_moves = m;
        }
        if self.no_alternate {
            config.alternate_sides = false;
        }
        config.validate()?;
        Ok((config, self.output))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (config, output) = Args::parse().into_config()?;
    let mut engine1 = create_engine(&config.engines[0])?;
    let mut engine2 = create_engine(&config.engines[1])?;

    info!(
        engine1 = %config.engines[0],
        engine2 = %config.engines[1],
        games = config.num_games,
        depth = config.depth,
        "starting match"
    );

    let runner = MatchRunner::new(config.clone());
    let (result, games) = runner.run_match(engine1.as_mut(), engine2.as_mut());
    let report = MatchReport::new(config, result, games);

    print!("{}", report.summary());

    if let Some(path) = output {
        let json = report.to_json().context("failed to serialize match report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
