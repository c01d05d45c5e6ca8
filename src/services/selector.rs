//! Reviewer selection.
//!
//! Picks up to N distinct candidates uniformly at random from a pool after
//! removing excluded ids. The randomness comes from a [`RandomSource`] so that
//! tests and staging environments can make assignment reproducible.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::debug;

use crate::config::Config;
use crate::entity::user;

/// Source of random index samples.
pub trait RandomSource: Send + Sync {
    /// Return `amount` distinct indices from `0..len`. Callers guarantee `amount <= len`.
    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize>;
}

/// Thread-local OS-seeded randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut rand::rng(), len, amount).into_vec()
    }
}

/// Reproducible randomness from a fixed seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        index::sample(&mut *rng, len, amount).into_vec()
    }
}

/// Always picks the first candidates in id order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidates;

impl RandomSource for FirstCandidates {
    fn sample_indices(&self, _len: usize, amount: usize) -> Vec<usize> {
        (0..amount).collect()
    }
}

/// Anything that can sit in a candidate pool.
pub trait Candidate {
    fn candidate_id(&self) -> &str;
}

impl Candidate for user::Model {
    fn candidate_id(&self) -> &str {
        &self.id
    }
}

impl Candidate for String {
    fn candidate_id(&self) -> &str {
        self
    }
}

/// Chooses reviewers from candidate pools.
#[derive(Clone)]
pub struct ReviewerSelector {
    source: Arc<dyn RandomSource>,
}

impl ReviewerSelector {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Selector backed by thread randomness, or a seeded generator when configured.
    pub fn from_config(config: &Config) -> Self {
        match config.random_seed {
            Some(seed) => Self::new(Arc::new(SeededRandom::new(seed))),
            None => Self::default(),
        }
    }

    /// Pick `min(count, eligible)` distinct candidates whose id is not excluded.
    ///
    /// Never fails: an exhausted pool yields an empty selection. Eligible
    /// candidates are ordered by id before sampling, so the result depends
    /// only on the random source and not on the order of `pool`.
    pub fn select<'a, T: Candidate>(
        &self,
        pool: &'a [T],
        exclude: &HashSet<&str>,
        count: usize,
    ) -> Vec<&'a T> {
        let mut eligible: Vec<&T> = pool
            .iter()
            .filter(|c| !exclude.contains(c.candidate_id()))
            .collect();
        eligible.sort_by(|a, b| a.candidate_id().cmp(b.candidate_id()));
        eligible.dedup_by(|a, b| a.candidate_id() == b.candidate_id());

        let amount = count.min(eligible.len());
        if amount == 0 {
            debug!(
                pool = pool.len(),
                excluded = exclude.len(),
                "No eligible reviewer candidates"
            );
            return Vec::new();
        }

        let picked: Vec<&T> = self
            .source
            .sample_indices(eligible.len(), amount)
            .into_iter()
            .filter_map(|i| eligible.get(i).copied())
            .collect();

        debug!(
            eligible = eligible.len(),
            picked = picked.len(),
            "Selected reviewer candidates"
        );

        picked
    }

    /// Pick a single candidate, if any remains.
    pub fn select_one<'a, T: Candidate>(
        &self,
        pool: &'a [T],
        exclude: &HashSet<&str>,
    ) -> Option<&'a T> {
        self.select(pool, exclude, 1).into_iter().next()
    }
}

impl Default for ReviewerSelector {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}
