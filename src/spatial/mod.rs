//! Spatial data structures for block-based image processing
//!
//! This module contains spatial-related functionality including:
//! - Content-hashable image blocks
//! - Block traversal orders and their corners
//! - Named arrangements resolving to traversals

/// Named axis, direction and pattern combinations
pub mod arrangement;
/// Content-hashable image tiles
pub mod block;
/// Corner sequences over a block grid
pub mod traversal;

pub use arrangement::Arrangement;
pub use block::Block;
pub use traversal::{Corner, Pattern, PrimaryAxis, Traversal};
