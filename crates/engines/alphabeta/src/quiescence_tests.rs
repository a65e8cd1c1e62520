use super::*;
use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::score::{mated_in, INFINITY};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn full_window(p: &Position, ctx: &mut SearchContext) -> i32 {
    let mut scratch = p.clone();
    let score = quiescence(&mut scratch, ctx, -INFINITY, INFINITY, 0);
    assert_eq!(&scratch, p, "quiescence must restore the position");
    score
}

#[test]
fn test_quiet_position_returns_static_eval() {
    let mut ctx = SearchContext::default();
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1",
    ] {
        let p = pos(fen);
        assert_eq!(full_window(&p, &mut ctx), evaluate(&p), "{fen}");
    }
    let black = pos("4k3/pppp4/8/8/8/8/PPPP4/4K3 b - - 0 1");
    assert_eq!(full_window(&black, &mut ctx), -evaluate(&black));
}

#[test]
fn test_wins_hanging_queen() {
    let mut ctx = SearchContext::default();
    let p = pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let stand_pat = relative_eval(&p, 0);
    assert!(full_window(&p, &mut ctx) > stand_pat + 500);
    assert!(ctx.qnodes() > 1);
}

#[test]
fn test_fail_hard_bounds() {
    let mut ctx = SearchContext::default();
    let mut p = pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    // Stand pat alone clears a beta far below it.
    assert_eq!(quiescence(&mut p, &mut ctx, -2_000, -1_000, 0), -1_000);
    // Nothing reaches an alpha far above.
    assert_eq!(quiescence(&mut p, &mut ctx, 5_000, 6_000, 0), 5_000);
}

#[test]
fn test_depth_cap_stops_at_stand_pat() {
    let mut ctx = SearchContext::new(SearchConfig {
        max_quiescence_depth: 0,
        ..SearchConfig::default()
    });
    let p = pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(full_window(&p, &mut ctx), relative_eval(&p, 0));
    assert_eq!(ctx.qnodes(), 1);
}

#[test]
fn test_checkmated_side_scores_by_ply() {
    let mut ctx = SearchContext::default();
    let mut p = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(quiescence(&mut p, &mut ctx, -INFINITY, INFINITY, 4), mated_in(4));
}
