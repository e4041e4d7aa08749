use serde::{Deserialize, Serialize};

/// The two players. `First` (sente) starts on rows 6..=8 and advances toward
/// row 0; `Second` (gote) starts on rows 0..=2 and advances toward row 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Row delta of one step forward.
    pub fn forward(self) -> i8 {
        match self {
            Side::First => -1,
            Side::Second => 1,
        }
    }

    /// Number of rows between `row` and the far edge this side advances toward.
    pub fn rows_to_far_edge(self, row: u8) -> u8 {
        match self {
            Side::First => row,
            Side::Second => 8 - row,
        }
    }

    /// Promotion zone: the three ranks nearest the far edge.
    pub fn in_promotion_zone(self, row: u8) -> bool {
        self.rows_to_far_edge(row) <= 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 8] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::King,
    ];

    /// Kinds that may sit in a hand.
    pub const HAND: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// How many pieces of this kind a full set holds.
    pub fn supply(self) -> u8 {
        match self {
            PieceKind::Pawn => 18,
            PieceKind::Lance | PieceKind::Knight | PieceKind::Silver | PieceKind::Gold => 4,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::King => 2,
        }
    }

    pub fn can_promote(self) -> bool {
        !matches!(self, PieceKind::Gold | PieceKind::King)
    }

    /// True when a piece of this kind standing `rows_to_far_edge` rows from
    /// the far edge has no forward move left: pawn and lance on the last rank,
    /// knight on the last two.
    pub fn is_stranded(self, rows_to_far_edge: u8) -> bool {
        match self {
            PieceKind::Pawn | PieceKind::Lance => rows_to_far_edge == 0,
            PieceKind::Knight => rows_to_far_edge <= 1,
            _ => false,
        }
    }

    /// Uppercase SFEN/USI letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPiece")]
pub struct Piece {
    pub kind: PieceKind,
    pub promoted: bool,
    pub owner: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Side) -> Self {
        Self {
            kind,
            promoted: false,
            owner,
        }
    }

    /// The promoted form. Gold and King stay as they are.
    pub fn promote(self) -> Self {
        Self {
            promoted: self.kind.can_promote(),
            ..self
        }
    }
}

/// Wire form of [`Piece`], checked before it becomes one.
#[derive(Deserialize)]
struct RawPiece {
    kind: PieceKind,
    promoted: bool,
    owner: Side,
}

impl TryFrom<RawPiece> for Piece {
    type Error = String;

    fn try_from(raw: RawPiece) -> Result<Self, Self::Error> {
        if raw.promoted && !raw.kind.can_promote() {
            return Err(format!("{:?} cannot be promoted", raw.kind));
        }
        Ok(Self {
            kind: raw.kind,
            promoted: raw.promoted,
            owner: raw.owner,
        })
    }
}

/// A board coordinate. Row 0 is Second's back rank, row 8 is First's.
/// Column 0 is file 9 in shogi notation, column 8 is file 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const COUNT: usize = 81;

    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "square out of bounds");
        Self { row, col }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn idx(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        if idx < Self::COUNT {
            Some(Self {
                row: (idx / 9) as u8,
                col: (idx % 9) as u8,
            })
        } else {
            None
        }
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        sq(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// All 81 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT).filter_map(Square::from_index)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = &'static str;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        if row < 9 && col < 9 {
            Ok(Self { row, col })
        } else {
            Err("square out of bounds")
        }
    }
}

impl From<Square> for (u8, u8) {
    fn from(s: Square) -> Self {
        (s.row, s.col)
    }
}

/// A move as a tagged variant: a board piece moving, or a hand piece dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Normal {
        from: Square,
        to: Square,
        promote: bool,
    },
    Drop {
        kind: PieceKind,
        to: Square,
    },
}

impl Move {
    pub fn normal(from: Square, to: Square) -> Self {
        Move::Normal {
            from,
            to,
            promote: false,
        }
    }

    pub fn promoting(from: Square, to: Square) -> Self {
        Move::Normal {
            from,
            to,
            promote: true,
        }
    }

    pub fn drop(kind: PieceKind, to: Square) -> Self {
        Move::Drop { kind, to }
    }

    pub fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    pub fn origin(self) -> Option<Square> {
        match self {
            Move::Normal { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    pub fn is_promotion(self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }

    pub fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }
}

// Helpers
pub fn sq(row: i8, col: i8) -> Option<Square> {
    if (0..9).contains(&row) && (0..9).contains(&col) {
        Some(Square::new(row as u8, col as u8))
    } else {
        None
    }
}
