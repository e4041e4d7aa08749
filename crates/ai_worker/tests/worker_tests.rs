use std::time::Duration;

use ai_worker::{AiRequest, AiResponse, AiWorker};
use classical_engine::order_moves;
use shogi_core::{legal_moves, Move, PieceKind, Position, Side, Square};

fn pos(sfen: &str) -> Position {
    Position::from_sfen(sfen).unwrap()
}

#[tokio::test]
async fn answers_with_a_legal_move() {
    let worker = AiWorker::spawn();
    let start = Position::startpos();

    let response = worker
        .think(AiRequest::for_side_to_move(start.clone(), 2))
        .await
        .unwrap();

    match response {
        AiResponse::BestMove(mv) => assert!(legal_moves(&start).contains(&mv)),
        AiResponse::NoMove => panic!("startpos has moves"),
    }
    worker.shutdown().await;
}

#[tokio::test]
async fn finds_mate_for_requested_side() {
    let worker = AiWorker::spawn();
    // Side to move in the snapshot is Second; the request asks for First.
    let p = pos("4k4/9/4P4/9/9/9/9/9/4K4 w G 1");

    let response = worker.think(AiRequest::new(p, Side::First, 1)).await.unwrap();

    assert_eq!(
        response,
        AiResponse::BestMove(Move::drop(PieceKind::Gold, Square::new(1, 4)))
    );
}

#[tokio::test]
async fn explicit_no_move() {
    let worker = AiWorker::spawn();
    let mated = pos("4l3k/9/9/9/9/9/9/4g4/4K4 b - 1");

    let no_moves = worker.think(AiRequest::for_side_to_move(mated, 3)).await;
    let depth_zero = worker
        .think(AiRequest::for_side_to_move(Position::startpos(), 0))
        .await;

    assert_eq!(no_moves, Ok(AiResponse::NoMove));
    assert_eq!(depth_zero, Ok(AiResponse::NoMove));
}

#[tokio::test]
async fn concurrent_requests_each_get_a_reply() {
    let worker = AiWorker::spawn();
    let start = Position::startpos();

    let (a, b) = tokio::join!(
        worker.think(AiRequest::for_side_to_move(start.clone(), 1)),
        worker.think(AiRequest::for_side_to_move(start.clone(), 1)),
    );

    assert!(matches!(a, Ok(AiResponse::BestMove(_))));
    assert_eq!(a, b);
}

fn mate_in_one() -> (AiRequest, AiResponse) {
    let p = pos("4k4/9/4P4/9/9/9/9/9/4K4 b G 1");
    (
        AiRequest::for_side_to_move(p, 1),
        AiResponse::BestMove(Move::drop(PieceKind::Gold, Square::new(1, 4))),
    )
}

#[tokio::test]
async fn cancel_before_the_search_starts_is_kept() {
    let worker = AiWorker::spawn();
    let start = Position::startpos();
    let mut ordered = legal_moves(&start);
    order_moves(&start, &mut ordered);

    // The request is queued on the first poll; the worker task has not run
    // yet when cancel is called.
    let (deep, ()) = tokio::join!(
        worker.think(AiRequest::for_side_to_move(start.clone(), 5)),
        async { worker.cancel() },
    );
    assert_eq!(deep, Ok(AiResponse::BestMove(ordered[0])));

    let (request, expected) = mate_in_one();
    assert_eq!(worker.think(request).await, Ok(expected));
    worker.shutdown().await;
}

#[tokio::test]
async fn cancel_interrupts_a_running_search() {
    let worker = AiWorker::spawn();
    let start = Position::startpos();

    let (deep, ()) = tokio::join!(
        worker.think(AiRequest::for_side_to_move(start.clone(), 5)),
        async {
            tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_millis(50)))
                .await
                .unwrap();
            worker.cancel();
        },
    );
    match deep {
        Ok(AiResponse::BestMove(mv)) => assert!(legal_moves(&start).contains(&mv)),
        other => panic!("expected a move, got {other:?}"),
    }

    let (request, expected) = mate_in_one();
    assert_eq!(worker.think(request).await, Ok(expected));
    worker.shutdown().await;
}

#[test]
fn request_serializes_as_json() {
    let request = AiRequest::for_side_to_move(Position::startpos(), 3);
    let json = serde_json::to_string(&request).unwrap();
    let back: AiRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, request);

    let response = AiResponse::BestMove(Move::drop(PieceKind::Pawn, Square::new(4, 4)));
    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(serde_json::from_str::<AiResponse>(&json).unwrap(), response);
}
