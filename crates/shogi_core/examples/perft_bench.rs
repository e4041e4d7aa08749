//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p shogi_core -- [depth] [sfen]
//!
//! Examples:
//!   # Default: depth 3 over the built-in positions
//!   cargo flamegraph --example perft_bench -p shogi_core
//!
//!   # Custom depth and position
//!   cargo flamegraph --example perft_bench -p shogi_core -- 2 "4k4/9/9/9/9/9/9/9/4K4 b RBGSNLP 1"

use shogi_core::{perft, Position, STARTPOS_SFEN};
use std::env;
use std::time::Instant;

const TEST_POSITIONS: &[(&str, &str)] = &[
    ("Starting position", STARTPOS_SFEN),
    (
        "Bishop exchange",
        "lnsgkgsnl/1r5+B1/pppppp1pp/6p2/9/2P6/PP1PPPPPP/7R1/LNSGKGSNL w B 1",
    ),
    ("Full hands", "4k4/9/9/9/9/9/9/9/4K4 b RBGSNLPrbgsnlp 1"),
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    if let Some(sfen) = args.get(2) {
        run_single_position(sfen, depth);
    } else {
        run_all_positions(depth);
    }
}

fn nps(nodes: u64, secs: f64) -> f64 {
    if secs > 0.0 {
        nodes as f64 / secs
    } else {
        0.0
    }
}

fn run_single_position(sfen: &str, depth: u8) {
    let pos = match Position::from_sfen(sfen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("Bad SFEN: {err}");
            return;
        }
    };

    println!("Position: {sfen}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let nodes = perft(&pos, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed.as_secs_f64()));
}

fn run_all_positions(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = std::time::Duration::ZERO;

    for (name, sfen) in TEST_POSITIONS {
        let Ok(pos) = Position::from_sfen(sfen) else {
            eprintln!("{name}: bad SFEN");
            continue;
        };

        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed.as_secs_f64())
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time.as_secs_f64())
    );
}
