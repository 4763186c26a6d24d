//! Per-candidate score accumulator.
//!
//! One `MoveEvaluation` exists per candidate move for the duration of a
//! single decision. It is updated only by the owning sampling loop.

use crate::rollout::RolloutOutcome;
use gambit_core::{GameStatus, Player};

/// Floor on the per-trial variance estimate used for confidence bounds.
///
/// Keeps a candidate that has only ever won (or only lost) from claiming
/// zero uncertainty after a handful of trials.
const MIN_VARIANCE: f64 = 0.05;

/// Running statistics for one candidate move.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveEvaluation<M> {
    /// The candidate move.
    pub mv: M,

    /// Sum of per-rollout scores from the deciding player's perspective.
    pub score_sum: f64,

    /// Number of rollouts run for this candidate.
    pub trials: u32,

    /// Sum of rollout lengths in plies.
    pub total_rollout_length: u64,

    /// Rollouts truncated at the depth limit and scored by heuristic.
    pub unfinished: u32,
}

impl<M> MoveEvaluation<M> {
    /// Create an empty accumulator for a candidate.
    pub fn new(mv: M) -> Self {
        Self {
            mv,
            score_sum: 0.0,
            trials: 0,
            total_rollout_length: 0,
            unfinished: 0,
        }
    }

    /// Fold one rollout result into the statistics.
    ///
    /// Scoring is relative to `decider`, the player choosing the move:
    /// - reaching the decider's goal scores +1
    /// - a decisive result the other way scores -1
    /// - a truncated rollout scores the heuristic times the decider's sign
    /// - a draw scores 0
    pub fn record(&mut self, outcome: &RolloutOutcome, decider: Player) {
        self.trials += 1;
        if outcome.status == decider.goal() {
            self.score_sum += 1.0;
        } else if outcome.status.is_decisive() {
            self.score_sum -= 1.0;
        } else if outcome.status == GameStatus::InPlay {
            if let Some(heuristic) = outcome.heuristic {
                self.score_sum += heuristic * decider.sign();
            }
            self.unfinished += 1;
        }
        self.total_rollout_length += u64::from(outcome.length);
    }

    /// Mean score per trial.
    ///
    /// Returns 0.0 if the candidate has never been sampled.
    pub fn normalized_score(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.score_sum / f64::from(self.trials)
        }
    }

    /// Mean rollout length in plies.
    pub fn average_length(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_rollout_length as f64 / f64::from(self.trials)
        }
    }

    /// Fraction of rollouts that hit the depth limit.
    pub fn unfinished_fraction(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            f64::from(self.unfinished) / f64::from(self.trials)
        }
    }

    /// Standard error of `normalized_score`.
    ///
    /// Uses the variance of a ±1 outcome with the same mean (1 - mean²),
    /// floored at `MIN_VARIANCE`. Unsampled candidates are infinitely uncertain.
    pub fn standard_error(&self) -> f64 {
        if self.trials == 0 {
            return f64::INFINITY;
        }
        let mean = self.normalized_score();
        let variance = (1.0 - mean * mean).max(MIN_VARIANCE);
        (variance / f64::from(self.trials)).sqrt()
    }

    /// Upper confidence bound at `z` standard errors.
    pub fn upper_bound(&self, z: f64) -> f64 {
        self.normalized_score() + z * self.standard_error()
    }

    /// Lower confidence bound at `z` standard errors.
    pub fn lower_bound(&self, z: f64) -> f64 {
        self.normalized_score() - z * self.standard_error()
    }
}
