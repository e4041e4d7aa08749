use super::*;
use shogi_core::{PieceKind, Square};

fn pos(sfen: &str) -> Position {
    Position::from_sfen(sfen).unwrap()
}

fn search(p: &Position, depth: u8) -> (SearchOutcome, u64) {
    let mut nodes = 0;
    let tc = TimeControl::new();
    tc.start();
    let outcome = pick_best_move(p, depth, &mut nodes, &tc);
    (outcome, nodes)
}

#[test]
fn test_pick_best_move_start_position() {
    let p = Position::startpos();
    let before = p.clone();
    let (outcome, nodes) = search(&p, 2);
    let (mv, _) = outcome.best_move.unwrap();
    assert!(legal_moves(&p).contains(&mv));
    assert!(!outcome.stopped);
    assert!(nodes > 0);
    assert_eq!(p, before);
}

#[test]
fn search_is_deterministic() {
    let p = Position::startpos();
    let first = search(&p, 2).0.best_move;
    let second = search(&p, 2).0.best_move;
    assert_eq!(first, second);
}

#[test]
fn depth_zero_returns_no_move() {
    let (outcome, nodes) = search(&Position::startpos(), 0);
    assert!(outcome.best_move.is_none());
    assert_eq!(nodes, 0);
}

#[test]
fn no_legal_moves_returns_no_move() {
    let p = pos("4l3k/9/9/9/9/9/9/4g4/4K4 b - 1");
    assert!(search(&p, 3).0.best_move.is_none());
}

#[test]
fn finds_mate_in_one() {
    let p = pos("4k4/9/4P4/9/9/9/9/9/4K4 b G 1");
    for depth in 1..=2 {
        let (mv, score) = search(&p, depth).0.best_move.unwrap();
        assert_eq!(mv, Move::drop(PieceKind::Gold, Square::new(1, 4)), "depth {depth}");
        assert_eq!(score, MATE_SCORE);
    }
}

#[test]
fn second_side_searches_for_itself() {
    // Mirror of the mate above, Second to move.
    let p = pos("4k4/9/9/9/9/9/4p4/9/4K4 w g 1");
    let (mv, score) = search(&p, 2).0.best_move.unwrap();
    assert_eq!(mv, Move::drop(PieceKind::Gold, Square::new(7, 4)));
    assert_eq!(score, MATE_SCORE);
}

#[test]
fn takes_a_hanging_rook() {
    let p = pos("k8/9/4r4/9/4R4/9/9/9/4K4 b - 1");
    let (mv, _) = search(&p, 1).0.best_move.unwrap();
    assert_eq!(mv.origin(), Some(Square::new(4, 4)));
    assert_eq!(mv.to(), Square::new(2, 4));
}

#[test]
fn ordering_puts_captures_and_promotions_first() {
    let p = pos("k8/9/4r4/9/4R4/9/9/9/4K4 b - 1");
    let mut moves = legal_moves(&p);
    order_moves(&p, &mut moves);
    assert_eq!(moves[0], Move::promoting(Square::new(4, 4), Square::new(2, 4)));
    assert_eq!(moves[1], Move::normal(Square::new(4, 4), Square::new(2, 4)));
}

#[test]
fn stopped_search_reports_stop() {
    let p = Position::startpos();
    let tc = TimeControl::new();
    tc.stop();
    let mut nodes = 0;
    let outcome = pick_best_move(&p, 3, &mut nodes, &tc);
    assert!(outcome.stopped);
    assert_eq!(nodes, 0);

    let mut moves = legal_moves(&p);
    order_moves(&p, &mut moves);
    assert_eq!(outcome.best_move, Some((moves[0], 0)));
}
