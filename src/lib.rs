//! Image forgetting through variable-order Markov chains over image blocks
//!
//! The source image is cut into fixed-size blocks visited in a configurable
//! traversal order. A Markov chain learns which blocks follow which, and the
//! image is then regenerated block by block by sampling from that chain while
//! replaying the same traversal.

#![forbid(unsafe_code)]

/// Learning and regeneration passes over image blocks
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Variable-order Markov chain engine
pub mod markov;
/// Mathematical utilities for seeded random selection
pub mod math;
/// Blocks, traversals and arrangements
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
