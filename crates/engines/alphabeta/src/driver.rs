//! Iterative deepening with aspiration windows under a time budget.

use std::time::Duration;

use chess_core::{legal_moves_into, Move, Position};
use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::{debug, info, trace, warn};

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::eval::relative_eval;
use crate::ordering::MoveOrderer;
use crate::score::INFINITY;
use crate::search::negamax;

/// Result of one driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` only when the position has no legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move.
    pub score: i32,
    /// Deepest completed iteration.
    pub depth: u8,
    /// Main search plus quiescence nodes.
    pub nodes: u64,
    /// The hard limit interrupted an iteration.
    pub timed_out: bool,
}

/// Progress report after each completed iteration.
#[derive(Debug, Clone)]
pub struct IterationInfo {
    pub depth: u8,
    pub seldepth: usize,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub best_move: Move,
}

#[derive(Debug, Clone, Copy)]
struct RootResult {
    best_move: Option<Move>,
    score: i32,
}

/// Owns a search context and runs iterative deepening over it.
#[derive(Debug, Default)]
pub struct Searcher {
    ctx: SearchContext,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            ctx: SearchContext::new(config),
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SearchContext {
        &mut self.ctx
    }

    /// Best move within `max_depth` plies and `move_time`. The position is
    /// restored before returning.
    pub fn search(&mut self, pos: &mut Position, max_depth: u8, move_time: Option<Duration>) -> Option<Move> {
        self.search_with_info(pos, max_depth, move_time, |_| {})
            .best_move
    }

    /// Like [`Searcher::search`], reporting every completed iteration.
    pub fn search_with_info(
        &mut self,
        pos: &mut Position,
        max_depth: u8,
        move_time: Option<Duration>,
        on_iteration: impl FnMut(&IterationInfo),
    ) -> SearchOutcome {
        iterative_deepening(pos, &mut self.ctx, max_depth, move_time, on_iteration)
    }

    pub fn new_game(&mut self) {
        self.ctx.new_game();
    }
}

pub fn iterative_deepening(
    pos: &mut Position,
    ctx: &mut SearchContext,
    max_depth: u8,
    move_time: Option<Duration>,
    mut on_iteration: impl FnMut(&IterationInfo),
) -> SearchOutcome {
    ctx.begin_search(move_time);

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            score: relative_eval(pos, 0),
            depth: 0,
            nodes: 0,
            timed_out: false,
        };
    }

    let mut completed: Option<(Move, i32)> = None;
    let mut interrupted: Option<(Move, i32)> = None;
    let mut completed_depth = 0u8;

    for depth in 1..=max_depth {
        if ctx.deadlines.past_soft() {
            break;
        }

        MoveOrderer {
            killers: &ctx.killers,
            history: &ctx.history,
        }
        .order(pos, &mut moves, completed.map(|(mv, _)| mv), 0);

        let window = ctx.config.aspiration_window;
        let (lo, hi) = match completed {
            Some((_, prev)) => (prev - window, prev + window),
            None => (-INFINITY, INFINITY),
        };

        let mut result = search_root(pos, ctx, &moves, depth as i32, lo, hi);
        let narrowed = completed.is_some();
        if narrowed && !ctx.timed_out && (result.score <= lo || result.score >= hi) {
            trace!(depth, score = result.score, lo, hi, "aspiration miss, re-searching full window");
            result = search_root(pos, ctx, &moves, depth as i32, -INFINITY, INFINITY);
        }

        if ctx.timed_out {
            if completed.is_none() {
                interrupted = result.best_move.map(|mv| (mv, result.score));
            }
            break;
        }

        let Some(best_move) = result.best_move else {
            break;
        };
        completed = Some((best_move, result.score));
        completed_depth = depth;

        let info = IterationInfo {
            depth,
            seldepth: ctx.seldepth,
            score: result.score,
            nodes: ctx.total_nodes(),
            elapsed: ctx.deadlines.elapsed(),
            best_move,
        };
        debug!(
            depth,
            score = info.score,
            nodes = info.nodes,
            elapsed_ms = info.elapsed.as_millis() as u64,
            best = %best_move,
            "iteration complete"
        );
        on_iteration(&info);
    }

    let (best_move, score) = match completed.or(interrupted) {
        Some(found) => found,
        None => {
            // Only reachable when the first iteration found nothing at all.
            let mv = *moves.choose(&mut thread_rng()).unwrap_or(&moves[0]);
            warn!(fen = %pos.to_fen(), fallback = %mv, "no move from search, playing a random legal move");
            (mv, relative_eval(pos, 0))
        }
    };

    info!(
        depth = completed_depth,
        score,
        nodes = ctx.total_nodes(),
        elapsed_ms = ctx.deadlines.elapsed().as_millis() as u64,
        timed_out = ctx.timed_out,
        best = %best_move,
        "search finished"
    );

    SearchOutcome {
        best_move: Some(best_move),
        score,
        depth: completed_depth,
        nodes: ctx.total_nodes(),
        timed_out: ctx.timed_out,
    }
}

/// One pass over the root moves with window `[alpha, beta]`. The first move
/// gets the whole window, later ones a null window that is widened when they
/// beat alpha.
fn search_root(
    pos: &mut Position,
    ctx: &mut SearchContext,
    moves: &[Move],
    depth: i32,
    mut alpha: i32,
    beta: i32,
) -> RootResult {
    let mut best = RootResult {
        best_move: None,
        score: -INFINITY,
    };

    for (i, &mv) in moves.iter().enumerate() {
        let undo = pos.make_move(mv);
        let mut score = if i == 0 {
            -negamax(pos, ctx, depth - 1, -beta, -alpha, 1, true)
        } else {
            -negamax(pos, ctx, depth - 1, -alpha - 1, -alpha, 1, true)
        };
        if i > 0 && score > alpha && score < beta && !ctx.timed_out {
            score = -negamax(pos, ctx, depth - 1, -beta, -alpha, 1, true);
        }
        pos.unmake_move(mv, undo);

        if ctx.timed_out {
            break;
        }
        if score > best.score {
            best = RootResult {
                best_move: Some(mv),
                score,
            };
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
