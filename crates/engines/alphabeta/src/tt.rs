//! Transposition table keyed by Zobrist hash.
//!
//! The table grows without bound for the lifetime of a search context and is
//! cleared between games. Writes overwrite whatever was stored for the key.

use std::collections::HashMap;

use chess_core::Move;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// The search failed high: true value ≥ score.
    LowerBound,
    /// The search failed low: true value ≤ score.
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: i32,
    /// Mate scores are relative to the stored node, see [`crate::score::to_tt`].
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// Classifies a finished node's score against the window it was searched with.
    pub fn classify(best: i32, original_alpha: i32, beta: i32) -> Bound {
        if best <= original_alpha {
            Bound::UpperBound
        } else if best >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        }
    }
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocates room for `capacity` positions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        self.entries.get(&hash).copied()
    }

    #[inline]
    pub fn put(&mut self, hash: u64, entry: TTEntry) {
        self.entries.insert(hash, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Outcome of a probe at a node searched with `[alpha, beta]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The stored result settles the node.
    Cutoff(i32),
    /// Continue searching with a possibly narrowed window.
    Window { alpha: i32, beta: i32 },
}

/// Applies a stored entry to a window. `score` must already be converted
/// back to root-relative form. Entries shallower than `depth` leave the
/// window unchanged.
pub fn apply_entry(entry: &TTEntry, score: i32, depth: i32, mut alpha: i32, mut beta: i32) -> Probe {
    if entry.depth < depth {
        return Probe::Window { alpha, beta };
    }
    match entry.bound {
        Bound::Exact => return Probe::Cutoff(score),
        Bound::LowerBound => alpha = alpha.max(score),
        Bound::UpperBound => beta = beta.min(score),
    }
    if alpha >= beta {
        Probe::Cutoff(score)
    } else {
        Probe::Window { alpha, beta }
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
