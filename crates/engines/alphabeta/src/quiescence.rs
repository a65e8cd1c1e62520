//! Tactical extension at the search horizon.

use chess_core::{tactical_moves_into, Position};

use crate::context::SearchContext;
use crate::eval::relative_eval;
use crate::ordering::MoveOrderer;

/// Fail-hard quiescence search over captures and checks.
///
/// The side to move may stand pat on its static score. Returns a value in
/// `[alpha, beta]`, relative to the side to move at `ply`.
pub fn quiescence(pos: &mut Position, ctx: &mut SearchContext, alpha: i32, beta: i32, ply: usize) -> i32 {
    qsearch(pos, ctx, alpha, beta, ply, 0)
}

fn qsearch(
    pos: &mut Position,
    ctx: &mut SearchContext,
    mut alpha: i32,
    beta: i32,
    ply: usize,
    qdepth: usize,
) -> i32 {
    ctx.qnodes += 1;
    ctx.reached(ply);

    let stand_pat = relative_eval(pos, ply);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if qdepth >= ctx.config.max_quiescence_depth {
        return alpha;
    }

    let mut moves = Vec::with_capacity(16);
    tactical_moves_into(pos, &mut moves);
    MoveOrderer {
        killers: &ctx.killers,
        history: &ctx.history,
    }
    .order(pos, &mut moves, None, ply);

    for mv in moves {
        let undo = pos.make_move(mv);
        let score = -qsearch(pos, ctx, -beta, -alpha, ply + 1, qdepth + 1);
        pos.unmake_move(mv, undo);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

#[cfg(test)]
#[path = "quiescence_tests.rs"]
mod quiescence_tests;
