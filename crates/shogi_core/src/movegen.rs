use crate::{
    attacks::{is_attacked, walk_destinations},
    board::{Board, Hand, Position},
    error::MoveError,
    types::*,
};

/// Whether a board move may, must, or cannot promote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotion {
    Never,
    Optional,
    Forced,
}

/// Promotion choice for `pc` moving from `from` to `to`. Promotion is possible
/// when either end of the move lies in the owner's promotion zone; it is forced
/// when the piece would otherwise have no move left from `to`.
pub fn promotion(pc: Piece, from: Square, to: Square) -> Promotion {
    let side = pc.owner;
    if pc.promoted || !pc.kind.can_promote() {
        return Promotion::Never;
    }
    if !side.in_promotion_zone(from.row()) && !side.in_promotion_zone(to.row()) {
        return Promotion::Never;
    }
    if pc.kind.is_stranded(side.rows_to_far_edge(to.row())) {
        Promotion::Forced
    } else {
        Promotion::Optional
    }
}

/// Pseudo-legal destinations of the piece on `from`, ignoring king safety.
/// Empty if the square is empty.
pub fn piece_destinations(board: &Board, from: Square) -> Vec<Square> {
    let mut out = Vec::new();
    if let Some(pc) = board.piece_at(from) {
        walk_destinations(board, from, pc, |to| {
            out.push(to);
            true
        });
    }
    out
}

/// Checks the drop rules for placing `kind` from `side`'s hand on `to`:
/// empty target, no second unpromoted pawn on a file, and no piece dropped
/// where it could never move.
pub fn check_drop(board: &Board, side: Side, kind: PieceKind, to: Square) -> Result<(), MoveError> {
    if board.piece_at(to).is_some() {
        return Err(MoveError::OccupiedSquare(to));
    }
    if kind == PieceKind::Pawn && board.has_pawn_in_col(side, to.col()) {
        return Err(MoveError::TwoPawns {
            file: 9 - to.col(),
        });
    }
    if kind.is_stranded(side.rows_to_far_edge(to.row())) {
        return Err(MoveError::DeadDrop { kind, to });
    }
    Ok(())
}

/// Appends every legal drop from `hand` for `side`.
pub fn drop_moves_into(board: &Board, hand: &Hand, side: Side, out: &mut Vec<Move>) {
    for kind in hand.kinds() {
        for to in Square::all() {
            if check_drop(board, side, kind, to).is_ok() {
                out.push(Move::drop(kind, to));
            }
        }
    }
}

fn board_moves_into(board: &Board, from: Square, pc: Piece, out: &mut Vec<Move>) {
    walk_destinations(board, from, pc, |to| {
        match promotion(pc, from, to) {
            Promotion::Never => out.push(Move::normal(from, to)),
            Promotion::Optional => {
                out.push(Move::normal(from, to));
                out.push(Move::promoting(from, to));
            }
            Promotion::Forced => out.push(Move::promoting(from, to)),
        }
        true
    });
}

/// All pseudo-legal moves for `side`: board moves with promotion variants
/// expanded, followed by drops. Appends to `out`.
pub fn pseudo_moves_into(pos: &Position, side: Side, out: &mut Vec<Move>) {
    for (from, pc) in pos.board.pieces_of(side) {
        board_moves_into(&pos.board, from, pc, out);
    }
    drop_moves_into(&pos.board, pos.hands.get(side), side, out);
}

/// True if playing `mv` for `side` does not leave `side`'s king attacked.
/// The move is simulated on a copy; `pos` is never touched.
pub fn keeps_king_safe(pos: &Position, side: Side, mv: Move) -> bool {
    let mut next = pos.clone();
    next.apply_move(mv, side);
    !is_attacked(&next.board, side)
}

/// Drops every move from `moves` that would leave `side`'s king attacked.
pub fn filter_legal(pos: &Position, side: Side, moves: &mut Vec<Move>) {
    moves.retain(|&mv| keeps_king_safe(pos, side, mv));
}

/// Generate all legal moves for `side` into the provided buffer, reusing it
/// across calls.
pub fn legal_moves_into(pos: &Position, side: Side, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves_into(pos, side, out);
    filter_legal(pos, side, out);
}

/// Generate all legal moves for `side`, returning a freshly allocated vector.
pub fn legal_moves_for(pos: &Position, side: Side) -> Vec<Move> {
    let mut out = Vec::with_capacity(128);
    legal_moves_into(pos, side, &mut out);
    out
}

/// Legal moves for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    legal_moves_for(pos, pos.side_to_move)
}

/// True if `side` has at least one legal move. Stops at the first one found.
pub fn has_legal_move(pos: &Position, side: Side) -> bool {
    let mut moves = Vec::with_capacity(128);
    pseudo_moves_into(pos, side, &mut moves);
    moves.into_iter().any(|mv| keeps_king_safe(pos, side, mv))
}

/// True if `side` has no legal move. Checkmate and stalemate are the same
/// outcome here: the side with nothing to play has lost.
pub fn is_terminal(pos: &Position, side: Side) -> bool {
    !has_legal_move(pos, side)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
