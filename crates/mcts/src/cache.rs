//! Evaluation cache.
//!
//! Remembers finished candidate evaluations keyed by the structural
//! `(state, move)` pair, so a repeated decision on an identical position can
//! skip its rollouts. Entries are only reused when they were computed with at
//! least as many samples as the current request. Nothing is evicted; the
//! owning strategy clears the cache explicitly.

use crate::evaluation::MoveEvaluation;
use std::collections::HashMap;
use std::hash::Hash;

/// A finished evaluation and the sample budget that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry<M> {
    pub evaluation: MoveEvaluation<M>,
    pub samples: u32,
}

/// Hit and miss counters since the cache was created or last cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Per-strategy memo of candidate evaluations.
#[derive(Debug)]
pub struct EvaluationCache<S, M> {
    entries: HashMap<S, HashMap<M, CacheEntry<M>>>,
    hits: u64,
    misses: u64,
}

impl<S, M> Default for EvaluationCache<S, M> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<S, M> EvaluationCache<S, M>
where
    S: Clone + Eq + Hash,
    M: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the evaluation of `mv` from `state`.
    ///
    /// Returns `None`, counting a miss, if there is no entry or the entry was
    /// computed with fewer than `samples` samples.
    pub fn lookup(&mut self, state: &S, mv: &M, samples: u32) -> Option<MoveEvaluation<M>> {
        let entry = self
            .entries
            .get(state)
            .and_then(|moves| moves.get(mv))
            .filter(|entry| entry.samples >= samples);

        match entry {
            Some(entry) => {
                self.hits += 1;
                Some(entry.evaluation.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store finished evaluations for candidates of `state`.
    ///
    /// An existing entry computed with more samples is kept.
    pub fn store<I>(&mut self, state: &S, evaluations: I, samples: u32)
    where
        I: IntoIterator<Item = MoveEvaluation<M>>,
    {
        let moves = self.entries.entry(state.clone()).or_default();
        for evaluation in evaluations {
            let keep_existing = moves
                .get(&evaluation.mv)
                .is_some_and(|existing| existing.samples > samples);
            if !keep_existing {
                moves.insert(
                    evaluation.mv.clone(),
                    CacheEntry {
                        evaluation,
                        samples,
                    },
                );
            }
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of cached (state, move) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.len(),
        }
    }
}
