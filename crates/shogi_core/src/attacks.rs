//! Piece movement patterns and attack detection.
//!
//! Offsets are written from First's point of view, where forward is `-1` rows.
//! Second uses the same tables with the row delta negated.

use crate::board::Board;
use crate::types::*;

type Offset = (i8, i8);

const PAWN_STEPS: &[Offset] = &[(-1, 0)];
const KNIGHT_STEPS: &[Offset] = &[(-2, -1), (-2, 1)];
const SILVER_STEPS: &[Offset] = &[(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];
const GOLD_STEPS: &[Offset] = &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];
const KING_STEPS: &[Offset] = &[
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const ORTHO: &[Offset] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAG: &[Offset] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];
const LANCE_RAY: &[Offset] = &[(-1, 0)];

/// Single-step offsets and sliding rays of a piece.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    pub steps: &'static [Offset],
    pub slides: &'static [Offset],
}

/// Movement of `pc` in First's frame. Promoted minor pieces move as gold;
/// a promoted bishop gains orthogonal steps and a promoted rook diagonal ones.
pub fn movement(pc: Piece) -> Movement {
    const NONE: &[Offset] = &[];
    let (steps, slides) = match (pc.kind, pc.promoted) {
        (PieceKind::King, _) => (KING_STEPS, NONE),
        (PieceKind::Gold, _)
        | (PieceKind::Pawn | PieceKind::Lance | PieceKind::Knight | PieceKind::Silver, true) => {
            (GOLD_STEPS, NONE)
        }
        (PieceKind::Pawn, false) => (PAWN_STEPS, NONE),
        (PieceKind::Lance, false) => (NONE, LANCE_RAY),
        (PieceKind::Knight, false) => (KNIGHT_STEPS, NONE),
        (PieceKind::Silver, false) => (SILVER_STEPS, NONE),
        (PieceKind::Bishop, false) => (NONE, DIAG),
        (PieceKind::Bishop, true) => (ORTHO, DIAG),
        (PieceKind::Rook, false) => (NONE, ORTHO),
        (PieceKind::Rook, true) => (DIAG, ORTHO),
    };
    Movement { steps, slides }
}

/// Visits every pseudo-legal destination of `pc` standing on `from`: in
/// bounds and not held by `pc`'s own side. Slides stop before an own piece and
/// after an enemy one. Stops early once `visit` returns `false`.
pub fn walk_destinations(
    board: &Board,
    from: Square,
    pc: Piece,
    mut visit: impl FnMut(Square) -> bool,
) {
    let flip = -pc.owner.forward();
    let Movement { steps, slides } = movement(pc);

    for &(dr, dc) in steps {
        if let Some(to) = from.offset(dr * flip, dc) {
            match board.piece_at(to) {
                Some(occ) if occ.owner == pc.owner => {}
                _ => {
                    if !visit(to) {
                        return;
                    }
                }
            }
        }
    }

    for &(dr, dc) in slides {
        let mut cur = from;
        while let Some(to) = cur.offset(dr * flip, dc) {
            match board.piece_at(to) {
                None => {
                    if !visit(to) {
                        return;
                    }
                }
                Some(occ) if occ.owner != pc.owner => {
                    if !visit(to) {
                        return;
                    }
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

/// True if `pc` on `from` could move to `target`.
pub fn attacks_square(board: &Board, from: Square, pc: Piece, target: Square) -> bool {
    let mut hit = false;
    walk_destinations(board, from, pc, |to| {
        hit = to == target;
        !hit
    });
    hit
}

/// True if any piece of `by` reaches `target`.
pub fn is_square_attacked(board: &Board, target: Square, by: Side) -> bool {
    board
        .pieces_of(by)
        .any(|(from, pc)| attacks_square(board, from, pc, target))
}

/// True if `side`'s king is attacked. A missing king counts as attacked: that
/// side has already lost.
pub fn is_attacked(board: &Board, side: Side) -> bool {
    match board.king_sq(side) {
        Some(ksq) => is_square_attacked(board, ksq, side.other()),
        None => true,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
