use super::*;

fn run(session: &mut UsiSession, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = session.handle(line, &mut out).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

#[test]
fn handshake() {
    let mut s = UsiSession::new();
    let (_, reply) = run(&mut s, "usi");
    assert!(reply.starts_with("id name Classical"));
    assert!(reply.contains("option name Depth type spin default 3 min 1 max 6"));
    assert!(reply.ends_with("usiok\n"));

    assert_eq!(run(&mut s, "isready").1, "readyok\n");
    assert_eq!(run(&mut s, "   ").1, "");
    assert_eq!(run(&mut s, "quit").0, Flow::Quit);
}

#[test]
fn depth_option_is_clamped() {
    let mut s = UsiSession::new();
    run(&mut s, "setoption name Depth value 4");
    assert_eq!(s.depth(), 4);
    run(&mut s, "setoption name Depth value 40");
    assert_eq!(s.depth(), 6);
    run(&mut s, "setoption name Depth value 0");
    assert_eq!(s.depth(), 1);
    run(&mut s, "setoption name Hash value 16");
    assert_eq!(s.depth(), 1);
}

#[test]
fn position_then_go() {
    let mut s = UsiSession::new();
    run(&mut s, "setoption name Depth value 1");
    run(&mut s, "position startpos moves 7g7f 3c3d");
    assert_eq!(s.position().side_to_move, shogi_core::Side::First);

    let (_, reply) = run(&mut s, "go");
    let mv = reply.strip_prefix("bestmove ").unwrap().trim();
    assert!(shogi_core::parse_usi_move(s.position(), mv).is_some(), "{mv}");
}

#[test]
fn bad_position_keeps_previous_one() {
    let mut s = UsiSession::new();
    run(&mut s, "position startpos moves 7g7f");
    let before = s.position().clone();
    run(&mut s, "position startpos moves 7g7e");
    assert_eq!(s.position(), &before);

    run(&mut s, "usinewgame");
    assert_eq!(s.position(), &Position::startpos());
}

#[test]
fn finds_mate_from_sfen() {
    let mut s = UsiSession::new();
    run(&mut s, "position sfen 4k4/9/4P4/9/9/9/9/9/4K4 b G 1");
    assert_eq!(run(&mut s, "go depth 1").1, "bestmove G*5b\n");
}

#[test]
fn resigns_without_moves() {
    let mut s = UsiSession::new();
    run(&mut s, "position sfen 4l3k/9/9/9/9/9/9/4g4/4K4 b - 1");
    assert_eq!(run(&mut s, "go").1, "bestmove resign\n");
}
