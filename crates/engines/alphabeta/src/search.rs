//! Negamax alpha-beta with transposition table, null-move pruning, late move
//! reductions and principal variation search.

use chess_core::{has_legal_move, legal_moves_into, Position};

use crate::context::SearchContext;
use crate::eval::relative_eval;
use crate::ordering::MoveOrderer;
use crate::quiescence::quiescence;
use crate::score::{from_tt, is_mate_score, to_tt, INFINITY, MAX_PLY};
use crate::tt::{apply_entry, Probe, TTEntry};

/// Searches `pos` to `depth` plies and returns its value for the side to move.
///
/// `ply` is the distance from the root and scales mate scores. `allow_null`
/// is false directly below a null move so two passes never follow each other.
///
/// Once the hard deadline passes, every call returns an unreliable value and
/// `ctx.timed_out()` is set; callers must discard the result.
pub fn negamax(
    pos: &mut Position,
    ctx: &mut SearchContext,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    ply: usize,
    allow_null: bool,
) -> i32 {
    if ctx.check_time() || ply >= MAX_PLY {
        return relative_eval(pos, ply);
    }
    ctx.nodes += 1;
    ctx.reached(ply);

    let hash = pos.hash();
    let mut tt_move = None;
    if ctx.config.use_transposition_table {
        if let Some(entry) = ctx.tt.get(hash) {
            tt_move = entry.best_move;
            match apply_entry(&entry, from_tt(entry.score, ply), depth, alpha, beta) {
                Probe::Cutoff(score) => return score,
                Probe::Window { alpha: a, beta: b } => {
                    alpha = a;
                    beta = b;
                }
            }
        }
    }

    if depth <= 0 || is_terminal(pos) {
        return quiescence(pos, ctx, alpha, beta, ply);
    }

    let us = pos.side_to_move;
    let in_check = pos.in_check(us);

    if allow_null
        && ctx.config.null_move
        && depth >= ctx.config.null_move_min_depth
        && !in_check
        && !is_mate_score(beta)
        && pos.has_non_pawn_material(us)
    {
        let undo = pos.make_null_move();
        let score = -negamax(
            pos,
            ctx,
            depth - ctx.config.null_move_reduction,
            -beta,
            -beta + 1,
            ply + 1,
            false,
        );
        pos.unmake_null_move(undo);
        if ctx.timed_out {
            return score;
        }
        if score >= beta {
            return beta;
        }
    }

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    MoveOrderer {
        killers: &ctx.killers,
        history: &ctx.history,
    }
    .order(pos, &mut moves, tt_move, ply);

    let original_alpha = alpha;
    let mut best = -INFINITY;
    let mut best_move = None;

    for (i, &mv) in moves.iter().enumerate() {
        let quiet = !pos.is_capture(mv) && mv.promo.is_none();
        let undo = pos.make_move(mv);

        let score = if i == 0 {
            -negamax(pos, ctx, depth - 1, -beta, -alpha, ply + 1, true)
        } else {
            let reduce = ctx.config.late_move_reduction
                && quiet
                && !in_check
                && i >= ctx.config.lmr_move_threshold
                && depth >= ctx.config.lmr_min_depth
                && !pos.in_check(pos.side_to_move);
            let r = reduce as i32;

            let mut s = -negamax(pos, ctx, depth - 1 - r, -alpha - 1, -alpha, ply + 1, true);
            if s > alpha && (r > 0 || s < beta) && !ctx.timed_out {
                s = -negamax(pos, ctx, depth - 1, -beta, -alpha, ply + 1, true);
            }
            s
        };
        pos.unmake_move(mv, undo);

        if ctx.timed_out {
            return best.max(score);
        }

        if score > best {
            best = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
            if quiet {
                ctx.history.reward(mv, depth);
            }
        }
        if alpha >= beta {
            if quiet {
                ctx.killers.store(ply, mv);
            }
            break;
        }
    }

    if ctx.config.use_transposition_table {
        ctx.tt.put(
            hash,
            TTEntry {
                depth,
                score: to_tt(best, ply),
                bound: TTEntry::classify(best, original_alpha, beta),
                best_move,
            },
        );
    }
    best
}

/// Mate, stalemate, dead position or a claimable fifty-move draw.
pub fn is_terminal(pos: &mut Position) -> bool {
    !has_legal_move(pos) || pos.is_insufficient_material() || pos.is_fifty_move_draw()
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
