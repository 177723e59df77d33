//! Variable-order Markov chain engine
//!
//! This module contains:
//! - The transition table with learning and sampling
//! - Caller-owned generation context for step-by-step sampling
//! - Boundary-aware tokens and states

/// Transition table learning and sampling
pub mod chain;
/// History and random source for step-by-step generation
pub mod context;
/// Symbols, boundary markers and states
pub mod token;

pub use chain::MarkovChain;
pub use context::{GenerationContext, GenerationStats};
pub use token::{State, Token};
