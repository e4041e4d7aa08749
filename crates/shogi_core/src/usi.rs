use std::fmt;

use crate::{board::Position, error::UsiError, movegen::legal_moves, types::*};

impl fmt::Display for Square {
    /// USI coordinate: file digit (9 at column 0) then rank letter (`a` at row 0).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'0' + 9 - self.col()) as char;
        let rank = (b'a' + self.row()) as char;
        write!(f, "{file}{rank}")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_usi(*self))
    }
}

pub fn parse_square(s: &str) -> Option<Square> {
    let b = s.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let (file, rank) = (b[0], b[1]);
    if !(b'1'..=b'9').contains(&file) || !(b'a'..=b'i').contains(&rank) {
        return None;
    }
    Some(Square::new(rank - b'a', 9 - (file - b'0')))
}

pub fn move_to_usi(mv: Move) -> String {
    match mv {
        Move::Normal { from, to, promote } => {
            let mut s = format!("{from}{to}");
            if promote {
                s.push('+');
            }
            s
        }
        Move::Drop { kind, to } => format!("{}*{to}", kind.letter()),
    }
}

/// Parses USI text into a move without checking it against a position.
pub fn parse_usi_text(txt: &str) -> Option<Move> {
    if let Some((piece, to)) = txt.split_once('*') {
        let mut chars = piece.chars();
        let kind = PieceKind::from_letter(chars.next()?)?;
        if chars.next().is_some() || kind == PieceKind::King {
            return None;
        }
        return Some(Move::drop(kind, parse_square(to)?));
    }
    let (body, promote) = match txt.strip_suffix('+') {
        Some(body) => (body, true),
        None => (txt, false),
    };
    if body.len() != 4 || !body.is_ascii() {
        return None;
    }
    let from = parse_square(&body[0..2])?;
    let to = parse_square(&body[2..4])?;
    Some(Move::Normal { from, to, promote })
}

/// Parses a USI move and accepts it only if it is legal in `pos`.
pub fn parse_usi_move(pos: &Position, txt: &str) -> Option<Move> {
    let mv = parse_usi_text(txt)?;
    legal_moves(pos).into_iter().find(|&m| m == mv)
}

/// Builds a position from the arguments of a USI `position` command:
/// `startpos [moves ...]` or `sfen <board> <side> <hands> <n> [moves ...]`.
pub fn position_from_usi(args: &[&str]) -> Result<Position, UsiError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &[][..]),
    };

    let mut pos = match setup.split_first() {
        Some((&"startpos", _)) => Position::startpos(),
        Some((&"sfen", rest)) => Position::from_sfen(&rest.join(" "))?,
        _ => return Err(UsiError::MissingPosition),
    };

    for &txt in moves {
        let mv = parse_usi_move(&pos, txt).ok_or_else(|| UsiError::UnknownMove(txt.to_string()))?;
        pos.make_move(mv);
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_round_trips_through_text() {
        let s = Square::new(6, 2);
        assert_eq!(s.to_string(), "7g");
        assert_eq!(parse_square("7g"), Some(s));
        assert_eq!(parse_square("1a"), Some(Square::new(0, 8)));
        assert_eq!(parse_square("9i"), Some(Square::new(8, 0)));
        assert_eq!(parse_square("0a"), None);
        assert_eq!(parse_square("5j"), None);
    }

    #[test]
    fn formats_moves() {
        let push = Move::normal(Square::new(6, 2), Square::new(5, 2));
        assert_eq!(move_to_usi(push), "7g7f");
        let promo = Move::promoting(Square::new(7, 1), Square::new(1, 7));
        assert_eq!(promo.to_string(), "8h2b+");
        let drop = Move::drop(PieceKind::Pawn, Square::new(4, 4));
        assert_eq!(drop.to_string(), "P*5e");
    }

    #[test]
    fn parse_rejects_illegal_and_malformed() {
        let pos = Position::startpos();
        assert!(parse_usi_move(&pos, "7g7f").is_some());
        assert!(parse_usi_move(&pos, "7g7e").is_none());
        assert!(parse_usi_move(&pos, "P*5e").is_none());
        assert!(parse_usi_text("K*5e").is_none());
        assert!(parse_usi_text("7g7").is_none());
    }

    #[test]
    fn position_command_replays_moves() {
        let pos = position_from_usi(&["startpos", "moves", "7g7f", "3c3d"]).unwrap();
        assert_eq!(pos.side_to_move, Side::First);
        assert!(pos.piece_at(Square::new(5, 2)).is_some());
        assert!(pos.piece_at(Square::new(3, 6)).is_some());

        let err = position_from_usi(&["startpos", "moves", "7g7e"]).unwrap_err();
        assert_eq!(err, UsiError::UnknownMove("7g7e".into()));
        assert_eq!(position_from_usi(&[]).unwrap_err(), UsiError::MissingPosition);
    }

    #[test]
    fn position_command_accepts_sfen() {
        let args = [
            "sfen",
            "4k4/9/9/9/9/9/9/9/4K4",
            "w",
            "P",
            "1",
            "moves",
            "5a4a",
        ];
        let pos = position_from_usi(&args).unwrap();
        assert_eq!(pos.side_to_move, Side::First);
        assert_eq!(pos.hands.first.count(PieceKind::Pawn), 1);
        assert_eq!(pos.king_sq(Side::Second), Some(Square::new(0, 5)));
    }
}
