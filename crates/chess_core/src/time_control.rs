//! Search limits and wall-clock deadlines.
//!
//! A search gets a depth cap and an optional per-move budget. The budget is
//! turned into two deadlines before the search starts:
//!
//! - the *soft* deadline: no new iterative-deepening iteration starts after it
//! - the *hard* deadline: every search node past it returns immediately
//!
//! Nothing here is shared between threads; a search owns its `Deadlines`.

use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
        }
    }

    /// Create limits with only time constraint (unbounded depth).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// How a move budget is split into soft and hard limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadlinePolicy {
    /// Share of the budget after which no new iteration starts
    pub soft_fraction: f64,
    /// Lower bound on the soft limit
    pub min_soft: Duration,
    /// The hard limit is never closer than this to the soft limit
    pub hard_margin: Duration,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            soft_fraction: 0.9,
            min_soft: Duration::from_millis(500),
            hard_margin: Duration::from_millis(200),
        }
    }
}

/// Soft and hard limits of one search, fixed when the search starts.
#[derive(Debug, Clone, Copy)]
pub struct Deadlines {
    start: Instant,
    soft: Option<Duration>,
    hard: Option<Duration>,
}

impl Deadlines {
    /// Starts the clock now. `None` means no time limit at all.
    pub fn start(budget: Option<Duration>, policy: &DeadlinePolicy) -> Self {
        let (soft, hard) = match budget {
            Some(budget) => {
                let (soft, hard) = policy.split(budget);
                (Some(soft), Some(hard))
            }
            None => (None, None),
        };
        Self {
            start: Instant::now(),
            soft,
            hard,
        }
    }

    pub fn unlimited() -> Self {
        Self::start(None, &DeadlinePolicy::default())
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn soft_limit(&self) -> Option<Duration> {
        self.soft
    }

    pub fn hard_limit(&self) -> Option<Duration> {
        self.hard
    }

    /// No new iteration should begin.
    #[inline]
    pub fn past_soft(&self) -> bool {
        self.soft.is_some_and(|s| self.elapsed() > s)
    }

    /// The search must unwind now.
    #[inline]
    pub fn past_hard(&self) -> bool {
        self.hard.is_some_and(|h| self.elapsed() > h)
    }
}

impl DeadlinePolicy {
    /// Returns `(soft, hard)` for a move budget.
    pub fn split(&self, budget: Duration) -> (Duration, Duration) {
        let soft = budget.mul_f64(self.soft_fraction).max(self.min_soft);
        let hard = budget.max(soft + self.hard_margin);
        (soft, hard)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
