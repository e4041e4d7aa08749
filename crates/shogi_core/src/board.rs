use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{attacks::is_attacked, types::*};

/// The 9x9 grid. Serialized as a flat sequence of 81 cells in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Piece>>", into = "Vec<Option<Piece>>")]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; Square::COUNT],
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.idx()]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.cells[sq.idx()] = pc;
    }

    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.idx()].take()
    }

    pub fn king_sq(&self, side: Side) -> Option<Square> {
        self.pieces_of(side)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |s| self.piece_at(s).map(|pc| (s, pc)))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.owner == side)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// True if `side` has an unpromoted pawn somewhere in column `col`.
    pub fn has_pawn_in_col(&self, side: Side, col: u8) -> bool {
        (0..9).any(|row| {
            matches!(
                self.piece_at(Square::new(row, col)),
                Some(Piece {
                    kind: PieceKind::Pawn,
                    promoted: false,
                    owner,
                }) if owner == side
            )
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Board> for Vec<Option<Piece>> {
    fn from(board: Board) -> Self {
        board.cells.to_vec()
    }
}

impl TryFrom<Vec<Option<Piece>>> for Board {
    type Error = String;

    fn try_from(cells: Vec<Option<Piece>>) -> Result<Self, Self::Error> {
        let len = cells.len();
        let cells: [Option<Piece>; Square::COUNT] = cells
            .try_into()
            .map_err(|_| format!("expected {} cells, got {}", Square::COUNT, len))?;
        Ok(Self { cells })
    }
}

/// Captured pieces available for dropping. Counts are always positive and
/// kinds are always unpromoted; iteration follows `PieceKind` order.
/// Serialized as a map from kind to count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<PieceKind, u8>", into = "BTreeMap<PieceKind, u8>")]
pub struct Hand {
    counts: BTreeMap<PieceKind, u8>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: PieceKind) -> u8 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Puts one piece of `kind` in the hand. Returns false, leaving the hand
    /// unchanged, for a king or a count that would overflow.
    pub fn add(&mut self, kind: PieceKind) -> bool {
        if kind == PieceKind::King {
            return false;
        }
        let n = self.counts.entry(kind).or_insert(0);
        match n.checked_add(1) {
            Some(next) => {
                *n = next;
                true
            }
            None => false,
        }
    }

    /// Takes one piece of `kind` out of the hand. Returns false if none is held.
    pub fn remove(&mut self, kind: PieceKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(&kind);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        self.counts.iter().map(|(&k, &n)| (k, n))
    }

    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.counts.keys().copied()
    }

    pub fn total(&self) -> usize {
        self.counts.values().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl From<Hand> for BTreeMap<PieceKind, u8> {
    fn from(hand: Hand) -> Self {
        hand.counts
    }
}

impl TryFrom<BTreeMap<PieceKind, u8>> for Hand {
    type Error = String;

    fn try_from(counts: BTreeMap<PieceKind, u8>) -> Result<Self, Self::Error> {
        for (&kind, &n) in &counts {
            if kind == PieceKind::King {
                return Err("a king cannot be held in hand".into());
            }
            if n == 0 || n > kind.supply() {
                return Err(format!("{n} is not a valid count for {kind:?} in hand"));
            }
        }
        Ok(Self { counts })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hands {
    pub first: Hand,
    pub second: Hand,
}

impl Hands {
    pub fn get(&self, side: Side) -> &Hand {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Hand {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }
}

/// Board, both hands and the side to move. Cloning is a deep copy, which is
/// what every simulated move operates on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub hands: Hands,
    pub side_to_move: Side,
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position::empty(Side::First);

        let back = [
            PieceKind::Lance,
            PieceKind::Knight,
            PieceKind::Silver,
            PieceKind::Gold,
            PieceKind::King,
            PieceKind::Gold,
            PieceKind::Silver,
            PieceKind::Knight,
            PieceKind::Lance,
        ];
        for (col, &kind) in back.iter().enumerate() {
            let col = col as u8;
            p.board
                .set_piece(Square::new(0, col), Some(Piece::new(kind, Side::Second)));
            p.board
                .set_piece(Square::new(8, col), Some(Piece::new(kind, Side::First)));
            p.board.set_piece(
                Square::new(2, col),
                Some(Piece::new(PieceKind::Pawn, Side::Second)),
            );
            p.board.set_piece(
                Square::new(6, col),
                Some(Piece::new(PieceKind::Pawn, Side::First)),
            );
        }

        // Second: rook on the left knight file, bishop on the right one.
        // First mirrors it.
        let majors = [
            (1, 1, PieceKind::Rook, Side::Second),
            (1, 7, PieceKind::Bishop, Side::Second),
            (7, 1, PieceKind::Bishop, Side::First),
            (7, 7, PieceKind::Rook, Side::First),
        ];
        for (row, col, kind, owner) in majors {
            p.board
                .set_piece(Square::new(row, col), Some(Piece::new(kind, owner)));
        }
        p
    }

    pub fn empty(side_to_move: Side) -> Self {
        Self {
            board: Board::empty(),
            hands: Hands::default(),
            side_to_move,
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn king_sq(&self, side: Side) -> Option<Square> {
        self.board.king_sq(side)
    }

    /// True if `side`'s king is attacked, or missing altogether.
    pub fn in_check(&self, side: Side) -> bool {
        is_attacked(&self.board, side)
    }

    /// Pieces on the board plus pieces in both hands.
    pub fn total_pieces(&self) -> usize {
        self.board.piece_count() + self.hands.first.total() + self.hands.second.total()
    }

    /// Applies `mv` for `side` without checking legality, and returns the kind
    /// of any captured piece. Captures go to `side`'s hand demoted.
    ///
    /// Moves should come from the move generator; a move with nothing to move
    /// (empty origin, drop of a piece not in hand) leaves the position as is.
    /// Use [`crate::Game::play`] for validated play.
    pub fn apply_move(&mut self, mv: Move, side: Side) -> Option<PieceKind> {
        match mv {
            Move::Drop { kind, to } => {
                let held = self.hands.get_mut(side).remove(kind);
                debug_assert!(held, "dropped {kind:?} not in hand");
                if held {
                    self.board.set_piece(to, Some(Piece::new(kind, side)));
                }
                None
            }
            Move::Normal { from, to, promote } => {
                let moved = self.board.take(from);
                debug_assert!(moved.is_some(), "no piece on from-square");
                let Some(mut moved) = moved else {
                    return None;
                };
                let captured = self.board.take(to).map(|pc| pc.kind);
                if let Some(kind) = captured {
                    self.hands.get_mut(side).add(kind);
                }
                if promote {
                    moved = moved.promote();
                }
                self.board.set_piece(to, Some(moved));
                captured
            }
        }
    }

    /// Applies `mv` for the side to move and passes the turn.
    pub fn make_move(&mut self, mv: Move) -> Option<PieceKind> {
        let captured = self.apply_move(mv, self.side_to_move);
        self.side_to_move = self.side_to_move.other();
        captured
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
