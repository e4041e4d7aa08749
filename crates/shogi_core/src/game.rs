//! Validated game flow: the only place the authoritative position is mutated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    board::Position,
    error::MoveError,
    movegen::{check_drop, is_terminal, keeps_king_safe, legal_moves, pseudo_moves_into},
    types::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Win(Side),
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Win(side) => Some(side),
            GameResult::InProgress => None,
        }
    }
}

/// A game in progress: the position, the moves played so far, and whether it
/// has ended. Once a side is left without legal moves the game is frozen.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    moves: Vec<Move>,
    result: GameResult,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Starts from an arbitrary position. If the side to move already has no
    /// legal move, the game is over from the outset.
    pub fn from_position(position: Position) -> Self {
        let stm = position.side_to_move;
        let result = if is_terminal(&position, stm) {
            GameResult::Win(stm.other())
        } else {
            GameResult::InProgress
        };
        Self {
            position,
            moves: Vec::new(),
            result,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.position)
    }

    /// Plays `mv` for the side to move. On success the turn passes and the
    /// opponent is checked for a terminal position, which ends the game in the
    /// mover's favor. On failure nothing changes.
    pub fn play(&mut self, mv: Move) -> Result<GameResult, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let side = self.position.side_to_move;
        if let Err(err) = validate(&self.position, side, mv) {
            warn!(%mv, ?side, %err, "rejected move");
            return Err(err);
        }

        self.position.make_move(mv);
        self.moves.push(mv);
        debug!(%mv, ?side, ply = self.moves.len(), "move played");

        if is_terminal(&self.position, side.other()) {
            self.result = GameResult::Win(side);
            info!(winner = ?side, plies = self.moves.len(), "game over");
        }
        Ok(self.result)
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> GameResult {
        if !self.is_over() {
            let loser = self.position.side_to_move;
            self.result = GameResult::Win(loser.other());
            info!(?loser, plies = self.moves.len(), "resigned");
        }
        self.result
    }
}

/// Accepts `mv` iff it is a legal move for `side`, and otherwise says why not.
pub fn validate(pos: &Position, side: Side, mv: Move) -> Result<(), MoveError> {
    let mut pseudo = Vec::with_capacity(128);
    pseudo_moves_into(pos, side, &mut pseudo);
    if !pseudo.contains(&mv) {
        return Err(rule_violation(pos, side, mv));
    }
    if !keeps_king_safe(pos, side, mv) {
        return Err(MoveError::LeavesKingAttacked(mv));
    }
    Ok(())
}

fn rule_violation(pos: &Position, side: Side, mv: Move) -> MoveError {
    match mv {
        Move::Drop { kind, to } => {
            if pos.hands.get(side).count(kind) == 0 {
                return MoveError::NotInHand(kind);
            }
            check_drop(&pos.board, side, kind, to)
                .err()
                .unwrap_or(MoveError::Illegal(mv))
        }
        Move::Normal { from, .. } => match pos.piece_at(from) {
            None => MoveError::NoPieceToMove(from),
            Some(pc) if pc.owner != side => MoveError::NotYourPiece(from),
            Some(_) => MoveError::Illegal(mv),
        },
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
