use super::*;

fn game(sfen: &str) -> Game {
    Game::from_position(Position::from_sfen(sfen).unwrap())
}

fn assert_rejected(g: &mut Game, mv: Move, expected: MoveError) {
    let before = g.position().clone();
    let plies = g.moves().len();
    assert_eq!(g.play(mv), Err(expected));
    assert_eq!(g.position(), &before);
    assert_eq!(g.moves().len(), plies);
}

#[test]
fn opening_pawn_push() {
    let mut g = Game::new();
    let from = Square::new(6, 4);
    let to = Square::new(5, 4);

    assert_eq!(g.play(Move::normal(from, to)), Ok(GameResult::InProgress));

    let pos = g.position();
    assert_eq!(pos.piece_at(from), None);
    assert_eq!(pos.piece_at(to), Some(Piece::new(PieceKind::Pawn, Side::First)));
    assert_eq!(g.side_to_move(), Side::Second);
    assert!(!is_terminal(pos, Side::Second));
    assert_eq!(g.moves(), &[Move::normal(from, to)]);
}

#[test]
fn rejections_name_the_broken_rule() {
    let mut g = Game::new();
    let empty = Square::new(4, 4);
    assert_rejected(
        &mut g,
        Move::normal(empty, Square::new(3, 4)),
        MoveError::NoPieceToMove(empty),
    );
    let theirs = Square::new(2, 4);
    assert_rejected(
        &mut g,
        Move::normal(theirs, Square::new(3, 4)),
        MoveError::NotYourPiece(theirs),
    );
    assert_rejected(
        &mut g,
        Move::drop(PieceKind::Pawn, empty),
        MoveError::NotInHand(PieceKind::Pawn),
    );
    let two_step = Move::normal(Square::new(6, 4), Square::new(4, 4));
    assert_rejected(&mut g, two_step, MoveError::Illegal(two_step));
    let early_promotion = Move::promoting(Square::new(6, 4), Square::new(5, 4));
    assert_rejected(&mut g, early_promotion, MoveError::Illegal(early_promotion));
}

#[test]
fn drop_rejections() {
    let mut g = game("4k4/9/9/9/9/9/4P4/9/4K4 b PN 1");
    let pawn_sq = Square::new(6, 4);
    assert_rejected(
        &mut g,
        Move::drop(PieceKind::Pawn, pawn_sq),
        MoveError::OccupiedSquare(pawn_sq),
    );
    assert_rejected(
        &mut g,
        Move::drop(PieceKind::Pawn, Square::new(4, 4)),
        MoveError::TwoPawns { file: 5 },
    );
    let back_rank = Square::new(1, 0);
    assert_rejected(
        &mut g,
        Move::drop(PieceKind::Knight, back_rank),
        MoveError::DeadDrop {
            kind: PieceKind::Knight,
            to: back_rank,
        },
    );
    assert!(g.play(Move::drop(PieceKind::Knight, Square::new(4, 0))).is_ok());
}

#[test]
fn moving_a_pinned_piece_is_refused() {
    let mut g = game("4r3k/9/9/9/9/9/9/4G4/4K4 b - 1");
    let mv = Move::normal(Square::new(7, 4), Square::new(7, 3));
    assert_rejected(&mut g, mv, MoveError::LeavesKingAttacked(mv));
}

#[test]
fn mate_ends_the_game() {
    let mut g = game("4k4/9/4P4/9/9/9/9/9/4K4 b G 1");
    assert_eq!(g.result(), GameResult::InProgress);

    let mate = Move::drop(PieceKind::Gold, Square::new(1, 4));
    assert_eq!(g.play(mate), Ok(GameResult::Win(Side::First)));
    assert!(g.is_over());
    assert_eq!(g.result().winner(), Some(Side::First));
    assert!(g.legal_moves().is_empty());

    let king = Square::new(0, 4);
    assert_rejected(
        &mut g,
        Move::normal(king, Square::new(0, 3)),
        MoveError::GameOver,
    );
}

#[test]
fn pawn_drop_mate_is_accepted() {
    let mut g = game("3lkl3/9/4G4/9/9/9/9/9/4K4 b P 1");
    let mv = Move::drop(PieceKind::Pawn, Square::new(1, 4));
    assert!(g.legal_moves().contains(&mv));
    assert_eq!(g.play(mv), Ok(GameResult::Win(Side::First)));
}

#[test]
fn terminal_start_position_is_already_decided() {
    let g = game("4l3k/9/9/9/9/9/9/4g4/4K4 b - 1");
    assert_eq!(g.result(), GameResult::Win(Side::Second));
    assert!(g.legal_moves().is_empty());
}

#[test]
fn resignation_loses_for_side_to_move() {
    let mut g = Game::new();
    assert_eq!(g.resign(), GameResult::Win(Side::Second));
    assert_eq!(g.resign(), GameResult::Win(Side::Second));
    assert!(g.play(Move::normal(Square::new(6, 4), Square::new(5, 4))).is_err());
}
