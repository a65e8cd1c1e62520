//! End-to-end properties of the search, checked against a plain full-width
//! minimax over the same evaluation and quiescence rules.

use std::time::{Duration, Instant};

use alphabeta_engine::eval::relative_eval;
use alphabeta_engine::score::is_mate_score;
use alphabeta_engine::search::is_terminal;
use alphabeta_engine::{evaluate, SearchConfig, Searcher};
use chess_core::{legal_moves, legal_moves_into, parse_uci_move, tactical_moves_into, Position};

const REFERENCE_POSITIONS: &[(&str, u8)] = &[
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
    ("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 3),
    ("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 3),
    ("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4", 2),
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
];

const MAX_QDEPTH: usize = 16;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

/// Stand pat or the best capture/check line, no pruning.
fn reference_quiescence(pos: &mut Position, ply: usize, qdepth: usize) -> i32 {
    let stand_pat = relative_eval(pos, ply);
    if qdepth >= MAX_QDEPTH {
        return stand_pat;
    }
    let mut moves = Vec::new();
    tactical_moves_into(pos, &mut moves);
    let mut best = stand_pat;
    for mv in moves {
        let undo = pos.make_move(mv);
        best = best.max(-reference_quiescence(pos, ply + 1, qdepth + 1));
        pos.unmake_move(mv, undo);
    }
    best
}

fn reference_minimax(pos: &mut Position, depth: i32, ply: usize) -> i32 {
    if depth <= 0 || is_terminal(pos) {
        return reference_quiescence(pos, ply, 0);
    }
    let mut moves = Vec::new();
    legal_moves_into(pos, &mut moves);
    let mut best = i32::MIN;
    for mv in moves {
        let undo = pos.make_move(mv);
        best = best.max(-reference_minimax(pos, depth - 1, ply + 1));
        pos.unmake_move(mv, undo);
    }
    best
}

fn driver_score(fen: &str, depth: u8, config: SearchConfig) -> i32 {
    let mut p = pos(fen);
    let outcome = Searcher::new(config).search_with_info(&mut p, depth, None, |_| {});
    assert_eq!(p, pos(fen), "search must restore the position");
    assert_eq!(outcome.depth, depth);
    outcome.score
}

#[test]
fn test_matches_reference_minimax() {
    for &(fen, depth) in REFERENCE_POSITIONS {
        let expected = reference_minimax(&mut pos(fen), depth as i32, 0);
        let got = driver_score(fen, depth, SearchConfig::exhaustive());
        assert_eq!(got, expected, "{fen} at depth {depth}");
    }
}

#[test]
fn test_transposition_table_keeps_scores() {
    for &(fen, depth) in REFERENCE_POSITIONS {
        let with_tt = SearchConfig {
            use_transposition_table: true,
            ..SearchConfig::exhaustive()
        };
        assert_eq!(
            driver_score(fen, depth, with_tt),
            driver_score(fen, depth, SearchConfig::exhaustive()),
            "{fen} at depth {depth}"
        );
    }
}

#[test]
fn test_mate_in_one_for_both_colors() {
    let white = pos("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    for (p, mate) in [(white.clone(), "e1e8"), (white.mirror(), "e8e1")] {
        let mut root = p.clone();
        let mv = Searcher::default().search(&mut root, 1, None).unwrap();
        assert_eq!(mv, parse_uci_move(&p, mate).unwrap());

        root.make_move(mv);
        let after = evaluate(&root);
        assert!(is_mate_score(after));
        assert_eq!(after.signum(), p.side_to_move.sign());
    }
}

#[test]
fn test_terminal_roots_score_zero() {
    for fen in ["k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", "8/8/8/4k3/8/4KB2/8/8 w - - 0 1"] {
        let mut p = pos(fen);
        let outcome = Searcher::default().search_with_info(&mut p, 4, None, |_| {});
        assert_eq!(outcome.score, 0, "{fen}");
    }
}

#[test]
fn test_bounded_termination() {
    let start = Instant::now();
    let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let outcome = Searcher::default().search_with_info(&mut p, u8::MAX, Some(Duration::from_millis(200)), |_| {});
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(legal_moves(&p).contains(&outcome.best_move.unwrap()));

    // Depth zero never runs an iteration but still answers.
    let mv = Searcher::default().search(&mut p, 0, None).unwrap();
    assert!(legal_moves(&p).contains(&mv));
}

#[test]
fn test_evaluate_is_pure_and_symmetric() {
    for &(fen, _) in REFERENCE_POSITIONS {
        let p = pos(fen);
        let before = p.clone();
        assert_eq!(evaluate(&p), evaluate(&p));
        assert_eq!(evaluate(&p), -evaluate(&p.mirror()), "{fen}");
        assert_eq!(p, before);
    }
}

#[test]
fn test_quiescence_is_noop_without_tactics() {
    use alphabeta_engine::quiescence::quiescence;
    use alphabeta_engine::score::INFINITY;
    use alphabeta_engine::SearchContext;

    let mut ctx = SearchContext::default();
    let mut p = Position::startpos();
    assert_eq!(quiescence(&mut p, &mut ctx, -INFINITY, INFINITY, 0), evaluate(&p));
}
