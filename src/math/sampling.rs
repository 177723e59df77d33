//! Seeded random selection primitives
//!
//! Every stochastic decision in the crate (categorical sampling, uniform
//! fallback, traversal shuffling) goes through [`RandomSelector`] so that a run
//! is exactly reproducible from its seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(random_seed())
    }

    /// Weighted random selection over non-negative weights
    ///
    /// Weights need not sum to exactly one; the draw is scaled by their total.
    /// Floating drift past the final bucket resolves to the last entry with
    /// positive weight. Returns `None` when no weight is positive.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = self.rng.random::<f64>() * total;
        let mut last_positive = None;
        for (i, &weight) in weights.iter().enumerate() {
            if !(weight.is_finite() && weight > 0.0) {
                continue;
            }
            last_positive = Some(i);
            remaining -= weight;
            if remaining < 0.0 {
                return Some(i);
            }
        }
        last_positive
    }

    /// Uniform index in `0..len`, or `None` for an empty range
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Draw a fresh seed from the thread-local generator
pub fn random_seed() -> u64 {
    rand::rng().random()
}
