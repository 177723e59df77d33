//! Mathematical utilities for the algorithm

/// Seeded weighted, uniform and shuffling selection
pub mod sampling;
