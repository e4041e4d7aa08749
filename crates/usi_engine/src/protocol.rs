use std::io::{self, Write};

use classical_engine::ClassicalEngine;
use shogi_core::{move_to_usi, position_from_usi, Engine, Position, SearchLimits, DEFAULT_DEPTH};
use tracing::{debug, warn};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State carried between USI commands.
pub struct UsiSession {
    pos: Position,
    depth: u8,
    engine: ClassicalEngine,
}

impl Default for UsiSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UsiSession {
    pub fn new() -> Self {
        Self {
            pos: Position::startpos(),
            depth: DEFAULT_DEPTH,
            engine: ClassicalEngine::new(),
        }
    }

    /// Handles one input line, writing any reply to `out`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "usi" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_DEPTH} min {MIN_DEPTH} max {MAX_DEPTH}"
                )?;
                writeln!(out, "usiok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(args),
            "usinewgame" => {
                self.pos = Position::startpos();
                self.engine.new_game();
            }
            "position" => match position_from_usi(args) {
                Ok(pos) => self.pos = pos,
                Err(err) => warn!(%err, line, "ignoring position command"),
            },
            "go" => {
                let depth = go_depth(args).unwrap_or(self.depth);
                let result = self.engine.search(&self.pos, SearchLimits::depth(depth));
                match result.best_move {
                    Some(mv) => writeln!(out, "bestmove {}", move_to_usi(mv))?,
                    None => writeln!(out, "bestmove resign")?,
                }
            }
            "quit" => return Ok(Flow::Quit),
            other => debug!(command = other, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    // setoption name Depth value 4
    fn set_option(&mut self, args: &[&str]) {
        let name = value_after(args, "name");
        let value = value_after(args, "value");
        match (name, value) {
            (Some(name), Some(value)) if name.eq_ignore_ascii_case("Depth") => match value.parse::<u8>() {
                Ok(d) => self.depth = d.clamp(MIN_DEPTH, MAX_DEPTH),
                Err(_) => warn!(value, "Depth must be a number"),
            },
            _ => debug!(?args, "ignoring unknown option"),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

fn value_after<'a>(args: &[&'a str], key: &str) -> Option<&'a str> {
    let idx = args.iter().position(|&a| a == key)?;
    args.get(idx + 1).copied()
}

fn go_depth(args: &[&str]) -> Option<u8> {
    value_after(args, "depth")
        .and_then(|d| d.parse::<u8>().ok())
        .map(|d| d.clamp(MIN_DEPTH, MAX_DEPTH))
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
