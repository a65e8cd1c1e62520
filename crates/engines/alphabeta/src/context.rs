//! Per-search mutable state.

use std::time::Duration;

use chess_core::Deadlines;

use crate::config::SearchConfig;
use crate::ordering::{HistoryTable, KillerTable};
use crate::tt::TranspositionTable;

/// Everything one search mutates: hash table, killer and history tables,
/// the clock and node counters.
///
/// Exactly one search uses a context at a time. The transposition table
/// survives between searches of the same game; killers, history and counters
/// are reset by [`SearchContext::begin_search`].
#[derive(Debug)]
pub struct SearchContext {
    pub(crate) config: SearchConfig,
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) deadlines: Deadlines,
    pub(crate) nodes: u64,
    pub(crate) qnodes: u64,
    pub(crate) seldepth: usize,
    pub(crate) timed_out: bool,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            tt: TranspositionTable::with_capacity(config.tt_capacity_hint),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            deadlines: Deadlines::unlimited(),
            nodes: 0,
            qnodes: 0,
            seldepth: 0,
            timed_out: false,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Starts the clock and clears per-search state.
    pub fn begin_search(&mut self, move_time: Option<Duration>) {
        self.deadlines = Deadlines::start(move_time, &self.config.deadline_policy());
        self.killers.clear();
        self.history.clear();
        self.nodes = 0;
        self.qnodes = 0;
        self.seldepth = 0;
        self.timed_out = false;
    }

    /// Forgets everything learned about earlier positions.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
    }

    /// Latches `timed_out` once the hard limit has passed.
    #[inline]
    pub(crate) fn check_time(&mut self) -> bool {
        if !self.timed_out && self.deadlines.past_hard() {
            self.timed_out = true;
        }
        self.timed_out
    }

    #[inline]
    pub(crate) fn reached(&mut self, ply: usize) {
        self.seldepth = self.seldepth.max(ply);
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn qnodes(&self) -> u64 {
        self.qnodes
    }

    /// Main search plus quiescence nodes.
    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.qnodes
    }

    pub fn seldepth(&self) -> usize {
        self.seldepth
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn deadlines(&self) -> &Deadlines {
        &self.deadlines
    }

    pub fn tt_len(&self) -> usize {
        self.tt.len()
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
