use super::*;
use chess_core::legal_moves_into;

#[test]
fn alphabeta_engine_returns_legal_move() {
    let mut engine = AlphaBetaEngine::default();
    let pos = Position::startpos();
    let result = engine.search(&pos, SearchLimits::depth(3));

    let mut pos_copy = pos.clone();
    let mut legal_moves = Vec::new();
    legal_moves_into(&mut pos_copy, &mut legal_moves);
    assert!(legal_moves.contains(&result.best_move.unwrap()));
    assert_eq!(result.depth, 3);
    assert!(!result.timed_out);
}

#[test]
fn alphabeta_engine_identity() {
    let engine = AlphaBetaEngine::default();
    assert_eq!(engine.name(), "AlphaBeta v1.0");
    assert_eq!(engine.author(), "ML-chess");
}

#[test]
fn alphabeta_engine_options() {
    let mut engine = AlphaBetaEngine::default();
    assert!(engine.set_option("NullMove", "false"));
    assert!(!engine.config().null_move);
    assert!(!engine.set_option("Ponder", "true"));
}

#[test]
fn limits_default_depth() {
    assert_eq!(limits_from(None, None).depth, DEFAULT_MAX_DEPTH);
    let l = limits_from(Some(5), Some(Duration::from_millis(10)));
    assert_eq!(l.depth, 5);
    assert_eq!(l.move_time, Some(Duration::from_millis(10)));
}
