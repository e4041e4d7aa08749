//! SFEN position notation.
//!
//! Ranks are listed from row 0 to row 8 and, within a rank, from column 0
//! (file 9) to column 8 (file 1). Uppercase letters are First's pieces.

use crate::{
    board::{Hand, Position},
    error::SfenError,
    types::*,
};

pub const STARTPOS_SFEN: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

// Conventional hand order: rook first, pawn last.
const HAND_ORDER: [PieceKind; 7] = [
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Knight,
    PieceKind::Lance,
    PieceKind::Pawn,
];

impl Position {
    /// Parses `<board> <side> [<hands> [<move number>]]`. Missing hands mean
    /// both hands are empty; the move number is validated and discarded.
    pub fn from_sfen(sfen: &str) -> Result<Self, SfenError> {
        let mut fields = sfen.split_whitespace();
        let board_part = fields.next().ok_or(SfenError::MissingField("board"))?;
        let side_part = fields
            .next()
            .ok_or(SfenError::MissingField("side to move"))?;
        let hand_part = fields.next().unwrap_or("-");

        let side_to_move = match side_part {
            "b" => Side::First,
            "w" => Side::Second,
            other => return Err(SfenError::BadSide(other.to_string())),
        };
        let mut pos = Position::empty(side_to_move);

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 9 {
            return Err(SfenError::RankCount(ranks.len()));
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0u8;
            let mut promoted = false;
            for ch in rank.chars() {
                if ch == '+' {
                    if promoted {
                        return Err(SfenError::BadPiece(ch));
                    }
                    promoted = true;
                    continue;
                }
                if let Some(d) = ch.to_digit(10) {
                    if promoted || d == 0 {
                        return Err(SfenError::BadPiece(ch));
                    }
                    col += d as u8;
                    if col > 9 {
                        return Err(SfenError::RankWidth { rank: row });
                    }
                    continue;
                }
                let kind = PieceKind::from_letter(ch).ok_or(SfenError::BadPiece(ch))?;
                if promoted && !kind.can_promote() {
                    return Err(SfenError::BadPromotion(kind));
                }
                if col >= 9 {
                    return Err(SfenError::RankWidth { rank: row });
                }
                let owner = if ch.is_ascii_uppercase() {
                    Side::First
                } else {
                    Side::Second
                };
                let piece = Piece {
                    kind,
                    promoted,
                    owner,
                };
                pos.board.set_piece(Square::new(row as u8, col), Some(piece));
                col += 1;
                promoted = false;
            }
            if col != 9 || promoted {
                return Err(SfenError::RankWidth { rank: row });
            }
        }

        if hand_part != "-" {
            parse_hands(hand_part, &mut pos)?;
        }

        if let Some(n) = fields.next() {
            n.parse::<u32>()
                .map_err(|_| SfenError::BadMoveNumber(n.to_string()))?;
        }

        Ok(pos)
    }

    /// Writes the position with move number 1.
    pub fn to_sfen(&self) -> String {
        let mut out = String::new();
        for row in 0..9u8 {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for col in 0..9u8 {
                match self.board.piece_at(Square::new(row, col)) {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        if pc.promoted {
                            out.push('+');
                        }
                        out.push(piece_char(pc));
                    }
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Side::First => 'b',
            Side::Second => 'w',
        });

        out.push(' ');
        let hands = hand_string(&self.hands.first, Side::First)
            + &hand_string(&self.hands.second, Side::Second);
        if hands.is_empty() {
            out.push('-');
        } else {
            out.push_str(&hands);
        }
        out.push_str(" 1");
        out
    }
}

fn piece_char(pc: Piece) -> char {
    match pc.owner {
        Side::First => pc.kind.letter(),
        Side::Second => pc.kind.letter().to_ascii_lowercase(),
    }
}

fn hand_string(hand: &Hand, owner: Side) -> String {
    let mut s = String::new();
    for kind in HAND_ORDER {
        let n = hand.count(kind);
        if n == 0 {
            continue;
        }
        if n > 1 {
            s.push_str(&n.to_string());
        }
        s.push(piece_char(Piece::new(kind, owner)));
    }
    s
}

fn parse_hands(text: &str, pos: &mut Position) -> Result<(), SfenError> {
    let bad = || SfenError::BadHand(text.to_string());
    let mut count: Option<u32> = None;
    for ch in text.chars() {
        if let Some(d) = ch.to_digit(10) {
            let n = count.unwrap_or(0) * 10 + d;
            if n > 18 {
                return Err(bad());
            }
            count = Some(n);
            continue;
        }
        let kind = PieceKind::from_letter(ch).ok_or_else(bad)?;
        let n = count.take().unwrap_or(1);
        if kind == PieceKind::King || n == 0 {
            return Err(bad());
        }
        let owner = if ch.is_ascii_uppercase() {
            Side::First
        } else {
            Side::Second
        };
        let hand = pos.hands.get_mut(owner);
        if u32::from(hand.count(kind)) + n > u32::from(kind.supply()) {
            return Err(bad());
        }
        for _ in 0..n {
            hand.add(kind);
        }
    }
    if count.is_some() {
        return Err(bad());
    }
    Ok(())
}

#[cfg(test)]
#[path = "sfen_tests.rs"]
mod sfen_tests;
