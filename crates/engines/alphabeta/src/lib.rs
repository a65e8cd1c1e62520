//! Alpha-Beta Chess Engine
//!
//! Iterative deepening negamax over a tapered evaluation:
//! - aspiration windows and principal variation search
//! - transposition table with exact/lower/upper bounds
//! - null-move pruning and late move reductions
//! - killer and history move ordering
//! - quiescence search over captures and checks

pub mod config;
pub mod context;
pub mod driver;
pub mod eval;
pub mod ordering;
mod pst;
pub mod quiescence;
pub mod score;
pub mod search;
pub mod tt;

use std::time::Duration;

use chess_core::{Engine, Position, SearchLimits, SearchResult};

pub use config::{ConfigError, SearchConfig};
pub use context::SearchContext;
pub use driver::{IterationInfo, SearchOutcome, Searcher};
pub use eval::evaluate;

/// Engine used when `go` names no depth.
pub const DEFAULT_MAX_DEPTH: u8 = 64;

/// `chess_core::Engine` adapter around [`Searcher`].
#[derive(Debug, Default)]
pub struct AlphaBetaEngine {
    searcher: Searcher,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.searcher.context().config()
    }

    /// Runs a search and reports every completed iteration to `on_iteration`.
    pub fn search_with_info(
        &mut self,
        pos: &Position,
        limits: SearchLimits,
        on_iteration: impl FnMut(&IterationInfo),
    ) -> SearchOutcome {
        let mut root = pos.clone();
        self.searcher
            .search_with_info(&mut root, limits.depth, limits.move_time, on_iteration)
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let outcome = self.search_with_info(pos, limits, |_| {});
        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: outcome.depth,
            nodes: outcome.nodes,
            timed_out: outcome.timed_out,
        }
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.searcher.new_game();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        self.searcher.context_mut().config_mut().set_option(name, value)
    }
}

/// Search limits for a UCI `go`: depth defaults to [`DEFAULT_MAX_DEPTH`].
pub fn limits_from(depth: Option<u8>, move_time: Option<Duration>) -> SearchLimits {
    SearchLimits {
        depth: depth.unwrap_or(DEFAULT_MAX_DEPTH),
        move_time,
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
