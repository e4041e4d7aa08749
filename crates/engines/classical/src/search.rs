//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores are always from the root side's point of view: plies where the root
//! side moves maximize, the others minimize. Every child is searched on a
//! clone, so the caller's position is never touched.

use std::cmp::Reverse;

use shogi_core::{has_legal_move, legal_moves, Move, Position, Side, TimeControl};

use tracing::trace;

use crate::eval::{evaluate, piece_value};

/// Score of a position whose side to move has no legal move.
pub const MATE_SCORE: i32 = 10_000_000;
/// Ordering bonus for promoting moves.
pub const PROMOTION_BONUS: i32 = 30;

const INFINITY: i32 = i32::MAX / 2;

/// Result from pick_best_move indicating whether search completed or was stopped.
pub struct SearchOutcome {
    /// Best move found with its score, None at depth 0 or with no legal moves.
    /// The score is 0 if the search stopped before scoring any root move.
    pub best_move: Option<(Move, i32)>,
    /// True if search was stopped before every root move was scored
    pub stopped: bool,
}

impl SearchOutcome {
    fn none() -> Self {
        Self {
            best_move: None,
            stopped: false,
        }
    }
}

/// Searches `pos` for its side to move and returns the best move with its
/// score.
///
/// # Arguments
/// * `pos` - The position to search
/// * `depth` - Search depth in plies; 0 yields no move
/// * `nodes` - Counter for nodes searched (for statistics)
/// * `tc` - Stop flag, polled before each root move
pub fn pick_best_move(pos: &Position, depth: u8, nodes: &mut u64, tc: &TimeControl) -> SearchOutcome {
    if depth == 0 {
        return SearchOutcome::none();
    }
    let root = pos.side_to_move;
    let mut moves = legal_moves(pos);
    if moves.is_empty() {
        return SearchOutcome::none();
    }
    order_moves(pos, &mut moves);

    let first = moves[0];
    let mut best: Option<(Move, i32)> = None;
    let mut alpha = -INFINITY;
    let mut stopped = false;

    for mv in moves {
        if tc.is_stopped() {
            stopped = true;
            break;
        }

        let mut child = pos.clone();
        child.make_move(mv);
        let score = minimax(&child, depth - 1, alpha, INFINITY, root, nodes);
        trace!(%mv, score, "root move scored");

        // Strict comparison: ties keep the earlier move in search order.
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
            alpha = alpha.max(score);
        }
    }

    SearchOutcome {
        // Stopped before any root move was scored: the first ordered move,
        // with a neutral score.
        best_move: Some(best.unwrap_or((first, 0))),
        stopped,
    }
}

/// Sorts captures of valuable pieces and promotions first. The sort is
/// stable, so equal moves keep generation order.
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(ordering_score(pos, mv)));
}

fn ordering_score(pos: &Position, mv: Move) -> i32 {
    let captured = match mv {
        Move::Normal { to, .. } => pos.piece_at(to).map_or(0, |pc| piece_value(pc.kind)),
        Move::Drop { .. } => 0,
    };
    let promotion = if mv.is_promotion() { PROMOTION_BONUS } else { 0 };
    captured + promotion
}

fn mate_score(side_to_move: Side, root: Side) -> i32 {
    if side_to_move == root {
        -MATE_SCORE
    } else {
        MATE_SCORE
    }
}

fn minimax(pos: &Position, depth: u8, mut alpha: i32, mut beta: i32, root: Side, nodes: &mut u64) -> i32 {
    *nodes += 1;
    let stm = pos.side_to_move;

    if depth == 0 {
        if !has_legal_move(pos, stm) {
            return mate_score(stm, root);
        }
        return evaluate(pos, root);
    }

    let mut moves = legal_moves(pos);
    if moves.is_empty() {
        return mate_score(stm, root);
    }
    order_moves(pos, &mut moves);

    let maximizing = stm == root;
    let mut best = if maximizing { -INFINITY } else { INFINITY };

    for mv in moves {
        let mut child = pos.clone();
        child.make_move(mv);
        let score = minimax(&child, depth - 1, alpha, beta, root, nodes);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
