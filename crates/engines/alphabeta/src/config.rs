//! Search tunables, loadable from TOML.
//!
//! ```toml
//! aspiration_window = 50
//! null_move = true
//! max_quiescence_depth = 16
//! ```
//!
//! Missing keys take their defaults.

use std::path::Path;
use std::time::Duration;

use chess_core::DeadlinePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Half-width of the window around the previous iteration's score
    pub aspiration_window: i32,
    /// Share of the move budget after which no new iteration starts
    pub soft_time_fraction: f64,
    pub min_soft_limit_ms: u64,
    /// Hard limit is at least this far past the soft limit
    pub hard_margin_ms: u64,

    pub null_move: bool,
    /// Depth taken off the null-move child search
    pub null_move_reduction: i32,
    pub null_move_min_depth: i32,

    pub late_move_reduction: bool,
    pub lmr_min_depth: i32,
    /// Moves searched at full depth before reductions start
    pub lmr_move_threshold: usize,

    pub use_transposition_table: bool,
    pub max_quiescence_depth: usize,
    /// Positions to preallocate in the transposition table
    pub tt_capacity_hint: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            aspiration_window: 50,
            soft_time_fraction: 0.9,
            min_soft_limit_ms: 500,
            hard_margin_ms: 200,
            null_move: true,
            null_move_reduction: 2,
            null_move_min_depth: 3,
            late_move_reduction: true,
            lmr_min_depth: 3,
            lmr_move_threshold: 4,
            use_transposition_table: true,
            max_quiescence_depth: 16,
            tt_capacity_hint: 0,
        }
    }
}

impl SearchConfig {
    /// Plain alpha-beta: no null move, no reductions, no hash table.
    /// Returns exactly the full-width minimax value at a fixed depth.
    pub fn exhaustive() -> Self {
        Self {
            null_move: false,
            late_move_reduction: false,
            use_transposition_table: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |field, reason| Err(ConfigError::OutOfRange { field, reason });
        if self.aspiration_window <= 0 {
            return fail("aspiration_window", "must be positive");
        }
        if !(self.soft_time_fraction > 0.0 && self.soft_time_fraction <= 1.0) {
            return fail("soft_time_fraction", "must be in (0, 1]");
        }
        if self.null_move_reduction < 1 {
            return fail("null_move_reduction", "must be at least 1");
        }
        if self.null_move_min_depth < 1 {
            return fail("null_move_min_depth", "must be at least 1");
        }
        if self.lmr_min_depth < 2 {
            return fail("lmr_min_depth", "must be at least 2");
        }
        if self.lmr_move_threshold < 1 {
            return fail("lmr_move_threshold", "must be at least 1");
        }
        Ok(())
    }

    pub fn deadline_policy(&self) -> DeadlinePolicy {
        DeadlinePolicy {
            soft_fraction: self.soft_time_fraction,
            min_soft: Duration::from_millis(self.min_soft_limit_ms),
            hard_margin: Duration::from_millis(self.hard_margin_ms),
        }
    }

    /// Applies a UCI `setoption`. Returns false for unknown names or values
    /// that would leave the config invalid.
    pub fn set_option(&mut self, name: &str, value: &str) -> bool {
        let mut next = self.clone();
        let parsed = match name.to_ascii_lowercase().as_str() {
            "nullmove" => value.parse().map(|v| next.null_move = v).is_ok(),
            "lmr" => value.parse().map(|v| next.late_move_reduction = v).is_ok(),
            "usehash" => value
                .parse()
                .map(|v| next.use_transposition_table = v)
                .is_ok(),
            "aspirationwindow" => value.parse().map(|v| next.aspiration_window = v).is_ok(),
            "quiescencedepth" => value.parse().map(|v| next.max_quiescence_depth = v).is_ok(),
            _ => false,
        };
        if parsed && next.validate().is_ok() {
            *self = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
