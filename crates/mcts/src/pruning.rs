//! Confidence-based candidate pruning.
//!
//! During a decision, candidates whose upper confidence bound falls below
//! the leader's lower confidence bound stop receiving rollouts. Their
//! statistics are frozen but they stay in the final ranking.

use crate::evaluation::MoveEvaluation;
use tracing::trace;

/// Deactivates candidates that can no longer catch the leader.
#[derive(Clone, Copy, Debug)]
pub struct PruningController {
    z: f64,
}

impl PruningController {
    /// Create a controller using `z` standard errors for both bounds.
    pub fn new(z: f64) -> Self {
        Self { z }
    }

    /// Run one pruning pass, returning the number of candidates deactivated.
    ///
    /// The leader is the active candidate with the highest normalized score
    /// (first on ties). It is never deactivated, so at least one candidate
    /// stays active whenever one was active before the pass.
    pub fn prune<M>(&self, evaluations: &[MoveEvaluation<M>], active: &mut [bool]) -> usize {
        debug_assert_eq!(evaluations.len(), active.len());

        let Some(leader) = Self::leader(evaluations, active) else {
            return 0;
        };
        let threshold = evaluations[leader].lower_bound(self.z);

        let mut deactivated = 0;
        for (index, evaluation) in evaluations.iter().enumerate() {
            if index == leader || !active[index] {
                continue;
            }
            if evaluation.upper_bound(self.z) < threshold {
                active[index] = false;
                deactivated += 1;
            }
        }

        trace!(
            leader,
            threshold,
            deactivated,
            remaining = active.iter().filter(|&&a| a).count(),
            "pruning pass"
        );

        deactivated
    }

    fn leader<M>(evaluations: &[MoveEvaluation<M>], active: &[bool]) -> Option<usize> {
        evaluations
            .iter()
            .enumerate()
            .filter(|(index, _)| active[*index])
            .map(|(index, evaluation)| (index, evaluation.normalized_score()))
            .reduce(|best, next| if next.1 > best.1 { next } else { best })
            .map(|(index, _)| index)
    }
}
