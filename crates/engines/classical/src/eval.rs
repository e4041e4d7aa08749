//! Static evaluation: material, promotion, advancement, king shelter and hands.

use shogi_core::{PieceKind, Position, Side, Square};

/// Material values, indexed by `PieceKind::idx()`.
/// Order: Pawn, Lance, Knight, Silver, Gold, Bishop, Rook, King
pub const PIECE_VALUES: [i32; 8] = [100, 100, 300, 500, 600, 800, 1000, 100_000];

const ADVANCE_PER_RANK: i32 = 10;
const SHELTER_PER_PIECE: i32 = 20;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Evaluates the position from `perspective`'s point of view.
///
/// Positive = good for `perspective`. The side to move plays no part in the
/// score.
pub fn evaluate(pos: &Position, perspective: Side) -> i32 {
    let sign = |owner: Side| if owner == perspective { 1 } else { -1 };
    let mut score = 0i32;

    for (sq, pc) in pos.board.pieces() {
        let base = piece_value(pc.kind);
        let promotion = if pc.promoted { base * 6 / 10 } else { 0 };
        score += sign(pc.owner) * (base + promotion + advance(pc.kind, pc.owner, sq));
    }

    for side in Side::ALL {
        score += sign(side) * SHELTER_PER_PIECE * shelter(pos, side);
        for (kind, count) in pos.hands.get(side).iter() {
            score += sign(side) * piece_value(kind) * count as i32;
        }
    }

    score
}

// Pawns, lances and knights earn a bonus for every rank they have advanced.
fn advance(kind: PieceKind, owner: Side, sq: Square) -> i32 {
    match kind {
        PieceKind::Pawn | PieceKind::Lance | PieceKind::Knight => {
            let ranks = match owner {
                Side::First => 8 - sq.row(),
                Side::Second => sq.row(),
            };
            ADVANCE_PER_RANK * ranks as i32
        }
        _ => 0,
    }
}

/// Friendly pieces on the squares around `side`'s king.
fn shelter(pos: &Position, side: Side) -> i32 {
    let Some(king) = pos.king_sq(side) else {
        return 0;
    };
    let mut count = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(pc) = king.offset(dr, dc).and_then(|sq| pos.piece_at(sq)) {
                if pc.owner == side {
                    count += 1;
                }
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(sfen: &str) -> Position {
        Position::from_sfen(sfen).unwrap()
    }

    #[test]
    fn startpos_is_balanced() {
        let p = Position::startpos();
        assert_eq!(evaluate(&p, Side::First), 0);
        assert_eq!(evaluate(&p, Side::Second), 0);
    }

    #[test]
    fn advanced_pawn_scores_material_and_ranks() {
        let p = pos("4k4/9/9/4P4/9/9/9/9/4K4 b - 1");
        assert_eq!(evaluate(&p, Side::First), 150);
        assert_eq!(evaluate(&p, Side::Second), -150);
    }

    #[test]
    fn promoted_pieces_earn_a_bonus() {
        let p = pos("4k4/9/9/9/4+B4/9/9/9/4K4 w - 1");
        assert_eq!(evaluate(&p, Side::First), 1280);
    }

    #[test]
    fn hand_pieces_count_as_material() {
        let p = pos("4k4/9/9/9/9/9/9/9/4K4 b P2g 1");
        assert_eq!(evaluate(&p, Side::First), 100 - 1200);
    }

    #[test]
    fn king_shelter_counts_adjacent_friends() {
        let p = pos("4k4/9/9/9/9/9/9/9/3GKG3 b - 1");
        assert_eq!(evaluate(&p, Side::First), 1200 + 2 * 20);
    }
}
