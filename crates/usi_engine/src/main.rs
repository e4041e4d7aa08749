//! USI engine binary. Commands arrive on stdin, replies go to stdout, logs go
//! to stderr.

mod protocol;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use protocol::{Flow, UsiSession};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UsiSession::new();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let flow = session
            .handle(&line, &mut stdout)
            .context("failed to write to stdout")?;
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}
