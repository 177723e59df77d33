//! Variable-order Markov chain over arbitrary hashable symbols
//!
//! Learning counts every `(state -> next)` window of the (optionally padded)
//! input sequences and normalizes the counts into probabilities. Generation
//! samples from those probabilities, falling back to a uniform draw over the
//! observed symbols for states that never occurred, and restarting from the
//! all-boundary state whenever the boundary marker is drawn.

use crate::io::configuration::MAX_RESTART_ATTEMPTS;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::markov::context::GenerationContext;
use crate::markov::token::{State, Token, boundary_state};
use crate::math::sampling::RandomSelector;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Outgoing transitions of one state, in first-seen order
#[derive(Debug, Clone)]
struct TransitionRow<S> {
    next: Vec<Token<S>>,
    counts: Vec<usize>,
    probabilities: Vec<f64>,
}

impl<S: Eq> TransitionRow<S> {
    const fn new() -> Self {
        Self {
            next: Vec::new(),
            counts: Vec::new(),
            probabilities: Vec::new(),
        }
    }

    fn increment(&mut self, token: Token<S>) {
        if let Some(position) = self.next.iter().position(|known| *known == token) {
            if let Some(count) = self.counts.get_mut(position) {
                *count += 1;
            }
        } else {
            self.next.push(token);
            self.counts.push(1);
        }
    }

    fn normalize(&mut self) {
        let total: usize = self.counts.iter().sum();
        self.probabilities = self
            .counts
            .iter()
            .map(|&count| count as f64 / total as f64)
            .collect();
    }
}

/// Result of one draw from the table
enum Draw<'a, S> {
    /// Sampled from a learned distribution
    Learned(&'a Token<S>),
    /// Uniform pick for a state absent from the table
    Fallback(&'a S),
}

/// Learned transition table with sampling entry points
#[derive(Debug, Clone)]
pub struct MarkovChain<S> {
    order: usize,
    pad: bool,
    max_restarts: usize,
    rows: HashMap<State<S>, TransitionRow<S>>,
    states: Vec<State<S>>,
    observed: Vec<S>,
    observed_index: HashSet<S>,
}

impl<S: Clone + Eq + Hash> MarkovChain<S> {
    /// Create an empty chain
    ///
    /// With `pad`, every learned sequence is framed by `order` boundary
    /// markers so that sequence starts and ends become learnable transitions.
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is zero.
    pub fn new(order: usize, pad: bool) -> Result<Self> {
        if order == 0 {
            return Err(invalid_parameter("order", &order, &"must be at least 1"));
        }
        Ok(Self {
            order,
            pad,
            max_restarts: MAX_RESTART_ATTEMPTS,
            rows: HashMap::new(),
            states: Vec::new(),
            observed: Vec::new(),
            observed_index: HashSet::new(),
        })
    }

    /// Override the cap on restarts from the all-boundary state
    #[must_use]
    pub const fn with_max_restarts(mut self, max_restarts: usize) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    /// Accumulate transition counts from `sequences` and renormalize
    ///
    /// Counts from earlier calls are kept; probabilities are recomputed over
    /// everything learned so far.
    pub fn learn<I, Q>(&mut self, sequences: I)
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<[S]>,
    {
        for sequence in sequences {
            let sequence = sequence.as_ref();
            for symbol in sequence {
                if self.observed_index.insert(symbol.clone()) {
                    self.observed.push(symbol.clone());
                }
            }

            let padding = if self.pad { self.order } else { 0 };
            let mut tokens: Vec<Token<S>> = boundary_state(padding);
            tokens.extend(sequence.iter().cloned().map(Token::Symbol));
            tokens.extend(boundary_state(padding));

            for window in tokens.windows(self.order + 1) {
                if let Some((next, state)) = window.split_last() {
                    self.count_transition(state, next.clone());
                }
            }
        }

        for row in self.rows.values_mut() {
            row.normalize();
        }
    }

    /// Drop every learned count and observed symbol
    pub fn clear(&mut self) {
        self.states.clear();
        self.rows.clear();
        self.observed.clear();
        self.observed_index.clear();
    }

    /// Sample the next symbol and append it to the context's history
    ///
    /// Without an explicit `state`, the state is the tail of the context's
    /// history, left-padded with boundary markers. Unseen states fall back to
    /// a uniform choice over the observed symbols. Drawing the boundary marker
    /// restarts from the all-boundary state.
    ///
    /// # Errors
    ///
    /// - [`AlgorithmError::EmptyModel`] if nothing has been learned
    /// - [`AlgorithmError::InvalidParameter`] if `state` has the wrong length
    /// - [`AlgorithmError::GenerationExhausted`] if restarts keep drawing the
    ///   boundary marker
    pub fn generate_next(
        &self,
        context: &mut GenerationContext<S>,
        state: Option<&[Token<S>]>,
    ) -> Result<S> {
        self.ensure_trained()?;
        let state = match state {
            Some(state) => {
                self.check_state(state)?;
                state.to_vec()
            }
            None => context.current_state(self.order),
        };

        let restart = boundary_state(self.order);
        let mut current = &state;
        for _ in 0..=self.max_restarts {
            match self.draw(current, context.selector_mut())? {
                Draw::Learned(Token::Symbol(symbol)) => {
                    let symbol = symbol.clone();
                    context.push(symbol.clone());
                    return Ok(symbol);
                }
                Draw::Fallback(symbol) => {
                    let symbol = symbol.clone();
                    context.record_fallback();
                    context.push(symbol.clone());
                    return Ok(symbol);
                }
                Draw::Learned(Token::Boundary) => {
                    context.record_restart();
                    current = &restart;
                }
            }
        }

        Err(AlgorithmError::GenerationExhausted {
            attempts: self.max_restarts,
        })
    }

    /// Generate `length` symbols from a private sliding window
    ///
    /// Unlike [`Self::generate_next`], no history is retained between calls.
    /// Boundary markers are sampled and slide through the window like any
    /// other token but are never returned.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::generate_next`]. A padded sequence end draws
    /// `order` boundary markers in a row before the window is all boundaries
    /// again; exhaustion is reported once the all-boundary window itself
    /// yields the boundary more than the restart cap allows.
    pub fn generate_sequence(
        &self,
        length: usize,
        start: Option<&[Token<S>]>,
        selector: &mut RandomSelector,
    ) -> Result<Vec<S>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        self.ensure_trained()?;
        let mut window: VecDeque<Token<S>> = match start {
            Some(start) => {
                self.check_state(start)?;
                start.iter().cloned().collect()
            }
            None => boundary_state(self.order).into(),
        };

        let mut sequence = Vec::with_capacity(length);
        let mut consecutive_boundaries = 0;
        while sequence.len() < length {
            let token = match self.draw(window.make_contiguous(), selector)? {
                Draw::Learned(token) => token.clone(),
                Draw::Fallback(symbol) => Token::Symbol(symbol.clone()),
            };

            if let Token::Symbol(symbol) = &token {
                consecutive_boundaries = 0;
                sequence.push(symbol.clone());
            } else {
                consecutive_boundaries += 1;
                if consecutive_boundaries > self.order.saturating_add(self.max_restarts) {
                    return Err(AlgorithmError::GenerationExhausted {
                        attempts: self.max_restarts,
                    });
                }
            }

            window.pop_front();
            window.push_back(token);
        }

        Ok(sequence)
    }

    /// Number of preceding tokens used as context
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Whether learned sequences are framed with boundary markers
    pub const fn is_padded(&self) -> bool {
        self.pad
    }

    /// Distinct symbols seen by `learn`, in first-seen order
    pub const fn observed_symbols(&self) -> &[S] {
        self.observed.as_slice()
    }

    /// Learned states, in first-seen order
    pub fn states(&self) -> impl Iterator<Item = &[Token<S>]> {
        self.states.iter().map(Vec::as_slice)
    }

    /// Number of distinct learned states
    pub const fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Outgoing distribution of `state`, or `None` if it was never learned
    pub fn probabilities(&self, state: &[Token<S>]) -> Option<Vec<(&Token<S>, f64)>> {
        let row = self.row(state)?;
        Some(
            row.next
                .iter()
                .zip(row.probabilities.iter().copied())
                .collect(),
        )
    }

    /// Probability of `next` following `state`; zero when either is unknown
    pub fn probability(&self, state: &[Token<S>], next: &Token<S>) -> f64 {
        self.row(state)
            .and_then(|row| {
                row.next
                    .iter()
                    .position(|token| token == next)
                    .and_then(|position| row.probabilities.get(position))
            })
            .copied()
            .unwrap_or(0.0)
    }

    fn row(&self, state: &[Token<S>]) -> Option<&TransitionRow<S>> {
        self.rows.get(state)
    }

    fn count_transition(&mut self, state: &[Token<S>], next: Token<S>) {
        if let Some(row) = self.rows.get_mut(state) {
            row.increment(next);
            return;
        }
        let mut row = TransitionRow::new();
        row.increment(next);
        self.states.push(state.to_vec());
        self.rows.insert(state.to_vec(), row);
    }

    fn draw<'a>(
        &'a self,
        state: &[Token<S>],
        selector: &mut RandomSelector,
    ) -> Result<Draw<'a, S>> {
        let learned = self.row(state).and_then(|row| {
            selector
                .weighted_choice(&row.probabilities)
                .and_then(|i| row.next.get(i))
        });
        if let Some(token) = learned {
            return Ok(Draw::Learned(token));
        }

        selector
            .uniform_index(self.observed.len())
            .and_then(|i| self.observed.get(i))
            .map(Draw::Fallback)
            .ok_or(AlgorithmError::EmptyModel)
    }

    fn check_state(&self, state: &[Token<S>]) -> Result<()> {
        if state.len() == self.order {
            Ok(())
        } else {
            Err(invalid_parameter(
                "state",
                &state.len(),
                &format!("expected exactly {} tokens", self.order),
            ))
        }
    }

    const fn ensure_trained(&self) -> Result<()> {
        if self.observed.is_empty() {
            Err(AlgorithmError::EmptyModel)
        } else {
            Ok(())
        }
    }
}
