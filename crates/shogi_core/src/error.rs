//! Error types for rejected moves and malformed notation.

use thiserror::Error;

use crate::types::{Move, PieceKind, Square};

/// Why a move was refused. The game is left unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("no piece on {0}")]
    NoPieceToMove(Square),
    #[error("the piece on {0} belongs to the opponent")]
    NotYourPiece(Square),
    #[error("no {0:?} in hand")]
    NotInHand(PieceKind),
    #[error("{0} is occupied")]
    OccupiedSquare(Square),
    #[error("an unpromoted pawn already stands on file {file}")]
    TwoPawns { file: u8 },
    #[error("a {kind:?} dropped on {to} could never move")]
    DeadDrop { kind: PieceKind, to: Square },
    #[error("{0} leaves the king attacked")]
    LeavesKingAttacked(Move),
    #[error("{0} is not a legal move")]
    Illegal(Move),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfenError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("expected 9 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 9 squares")]
    RankWidth { rank: usize },
    #[error("unknown piece character {0:?}")]
    BadPiece(char),
    #[error("{0:?} cannot be promoted")]
    BadPromotion(PieceKind),
    #[error("invalid side to move {0:?}")]
    BadSide(String),
    #[error("invalid hand {0:?}")]
    BadHand(String),
    #[error("invalid move number {0:?}")]
    BadMoveNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsiError {
    #[error(transparent)]
    Sfen(#[from] SfenError),
    #[error("expected `startpos` or `sfen`")]
    MissingPosition,
    #[error("unknown or illegal move {0:?}")]
    UnknownMove(String),
}
