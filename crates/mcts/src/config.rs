//! MCTS configuration parameters.
//!
//! These parameters control the sampling budget and the optional pruning and
//! caching layers of the Monte Carlo strategy. They are fixed for the life of
//! a strategy instance.

use gambit_core::{GambitError, Result};
use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of sampling rounds per decision.
    /// Every active candidate receives one rollout per round.
    pub samples: u32,

    /// Maximum plies in a rollout before it is truncated and scored
    /// with the in-play heuristic.
    pub depth: u32,

    /// Reuse finished evaluations for identical (state, move) pairs
    /// across decisions.
    pub use_cache: bool,

    /// Periodically stop sampling candidates that cannot catch the leader.
    pub use_pruning: bool,

    /// Rounds between pruning passes.
    pub pruning_period: u32,

    /// Confidence multiplier applied to the standard error when pruning.
    /// Larger values prune less aggressively.
    pub z: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            samples: 60,
            depth: 100,
            use_cache: false,
            use_pruning: false,
            pruning_period: 10,
            z: 1.0,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of sampling rounds.
    pub fn with_samples(samples: u32) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }

    /// Set the rollout depth limit.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Enable the evaluation cache.
    pub fn cached(mut self) -> Self {
        self.use_cache = true;
        self
    }

    /// Enable confidence-based pruning.
    pub fn pruned(mut self) -> Self {
        self.use_pruning = true;
        self
    }

    /// Check the parameters for values the search cannot run with.
    ///
    /// # Errors
    /// Returns `GambitError::InvalidConfig` if `samples` or `pruning_period`
    /// is zero, or `z` is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(GambitError::InvalidConfig(
                "samples must be at least 1".to_string(),
            ));
        }
        if self.pruning_period == 0 {
            return Err(GambitError::InvalidConfig(
                "pruning_period must be at least 1".to_string(),
            ));
        }
        if !self.z.is_finite() || self.z < 0.0 {
            return Err(GambitError::InvalidConfig(format!(
                "z must be a finite non-negative number, got {}",
                self.z
            )));
        }
        Ok(())
    }

    /// True if a pruning pass is due after `round` completed rounds.
    pub fn prune_due(&self, round: u32) -> bool {
        self.use_pruning && round > 0 && round % self.pruning_period == 0
    }
}
