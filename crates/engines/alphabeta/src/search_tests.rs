use std::thread;
use std::time::Duration;

use super::*;
use crate::config::SearchConfig;
use crate::score::{mate_in, INFINITY, MAX_PLY};
use chess_core::parse_uci_move;

const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn search(p: &Position, ctx: &mut SearchContext, depth: i32) -> i32 {
    let mut scratch = p.clone();
    let score = negamax(&mut scratch, ctx, depth, -INFINITY, INFINITY, 0, true);
    assert_eq!(&scratch, p, "search must restore the position");
    score
}

#[test]
fn test_finds_mate_in_one() {
    let mut ctx = SearchContext::default();
    let p = pos(MATE_IN_ONE);
    assert_eq!(search(&p, &mut ctx, 1), mate_in(1));
    assert_eq!(search(&p, &mut ctx, 3), mate_in(1));
}

#[test]
fn test_hash_move_is_recorded() {
    let mut ctx = SearchContext::new(SearchConfig::exhaustive());
    ctx.config_mut().use_transposition_table = true;
    let p = pos(MATE_IN_ONE);
    search(&p, &mut ctx, 2);

    let entry = ctx.tt.get(p.hash()).expect("root stored");
    assert_eq!(entry.depth, 2);
    assert_eq!(entry.best_move, Some(parse_uci_move(&p, "e1e8").unwrap()));
}

#[test]
fn test_tt_disabled_stores_nothing() {
    let mut ctx = SearchContext::new(SearchConfig::exhaustive());
    search(&pos(KIWIPETE), &mut ctx, 2);
    assert_eq!(ctx.tt_len(), 0);
    assert!(ctx.nodes() > 48);
}

#[test]
fn test_terminal_positions() {
    for fen in [
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/4R3/8 w - - 100 80",
    ] {
        assert!(is_terminal(&mut pos(fen)), "{fen}");
    }
    assert!(!is_terminal(&mut Position::startpos()));
}

#[test]
fn test_draw_scores_zero() {
    let mut ctx = SearchContext::default();
    assert_eq!(search(&pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1"), &mut ctx, 3), 0);
    assert_eq!(search(&pos("8/8/8/4k3/8/4KN2/8/8 w - - 0 1"), &mut ctx, 3), 0);
}

#[test]
fn test_hard_deadline_aborts() {
    let mut ctx = SearchContext::new(SearchConfig {
        min_soft_limit_ms: 0,
        hard_margin_ms: 0,
        ..SearchConfig::default()
    });
    ctx.begin_search(Some(Duration::ZERO));
    thread::sleep(Duration::from_millis(2));

    let p = pos(KIWIPETE);
    let score = search(&p, &mut ctx, 6);
    assert!(ctx.timed_out());
    assert_eq!(score, relative_eval(&p, 0));
    assert_eq!(ctx.tt_len(), 0, "aborted nodes are never stored");
}

#[test]
fn test_pruning_keeps_search_sane() {
    // Null move and LMR on: still wins the hanging queen.
    let mut ctx = SearchContext::default();
    let p = pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    assert!(search(&p, &mut ctx, 4) > 0);
}

#[test]
fn test_cutoffs_feed_killers_and_history() {
    let mut ctx = SearchContext::default();
    search(&pos(KIWIPETE), &mut ctx, 3);

    let has_killer = (0..MAX_PLY).any(|ply| ctx.killers.get(ply).iter().any(Option::is_some));
    assert!(has_killer, "no quiet cutoff recorded");

    let rewarded = (0..64u8)
        .flat_map(|from| (0..64u8).map(move |to| chess_core::Move::new(from, to)))
        .any(|mv| ctx.history.get(mv) > 0);
    assert!(rewarded, "no quiet move credited");
}
