//! Caller-owned state for step-by-step generation

use crate::markov::token::{State, tail_state};
use crate::math::sampling::RandomSelector;

/// Counters describing how a generation run recovered from gaps in the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Symbols returned to the caller
    pub generated: usize,
    /// Unseen states answered by a uniform draw over observed symbols
    pub fallbacks: usize,
    /// Boundary samples that restarted from the all-boundary state
    pub restarts: usize,
}

/// Generated-so-far history and random source for `generate_next`
///
/// Keeping this outside the chain lets one learned model drive several
/// independent, reproducible generation runs.
#[derive(Debug, Clone)]
pub struct GenerationContext<S> {
    history: Vec<S>,
    selector: RandomSelector,
    stats: GenerationStats,
}

impl<S: Clone> GenerationContext<S> {
    /// Empty context with a deterministic random source
    pub fn new(seed: u64) -> Self {
        Self::with_selector(RandomSelector::new(seed))
    }

    /// Empty context drawing from an existing selector
    pub fn with_selector(selector: RandomSelector) -> Self {
        Self {
            history: Vec::new(),
            selector,
            stats: GenerationStats::default(),
        }
    }

    /// Forget all generated symbols and counters, keeping the random stream
    pub fn reset(&mut self) {
        self.history.clear();
        self.stats = GenerationStats::default();
    }

    /// Forget everything and restart the random stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.reset();
        self.selector = RandomSelector::new(seed);
    }

    /// Symbols generated since creation or the last reset
    pub const fn history(&self) -> &[S] {
        self.history.as_slice()
    }

    /// Recovery counters since creation or the last reset
    pub const fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// State formed by the last `order` generated symbols
    pub fn current_state(&self, order: usize) -> State<S> {
        tail_state(&self.history, order)
    }

    pub(crate) const fn selector_mut(&mut self) -> &mut RandomSelector {
        &mut self.selector
    }

    pub(crate) fn push(&mut self, symbol: S) {
        self.history.push(symbol);
        self.stats.generated += 1;
    }

    pub(crate) const fn record_fallback(&mut self) {
        self.stats.fallbacks += 1;
    }

    pub(crate) const fn record_restart(&mut self) {
        self.stats.restarts += 1;
    }
}
