//! Block traversal orders over a 2D grid
//!
//! A [`Traversal`] describes the order in which block corners are visited.
//! The same configuration is replayed twice by the forgetter: once while
//! learning and once while regenerating. Cloning a traversal (including its
//! shuffle seed) reproduces the identical corner sequence, which is what ties
//! each position of the learned sequence to a location in the image.

use crate::io::error::{AlgorithmError, Result};
use crate::math::sampling::{RandomSelector, random_seed};
use std::fmt;

/// Top-left pixel coordinate of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Corner {
    /// Row of the block's top-left pixel
    pub row: usize,
    /// Column of the block's top-left pixel
    pub col: usize,
}

impl Corner {
    /// Create a corner at `(row, col)`
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Corner {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimension that varies slowest during a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryAxis {
    /// Row-major: finish a whole row of blocks before moving down (axis 0)
    Rows,
    /// Column-major: finish a whole column of blocks before moving across (axis 1)
    Columns,
}

/// Visiting rule applied on top of the raster order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Plain raster order
    Sequential,
    /// Raster order shuffled with the traversal's seed
    Shuffled,
    /// Boustrophedon: every other strip is walked in reverse
    Zigzag,
}

/// Validated traversal configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    rows: usize,
    cols: usize,
    block_size: isize,
    axis: PrimaryAxis,
    pattern: Pattern,
    seed: Option<u64>,
}

impl Traversal {
    /// Build a traversal over a `(rows, cols)` grid
    ///
    /// A negative `block_size` walks both dimensions from their high end
    /// toward zero. For [`Pattern::Shuffled`] without a seed, a random seed
    /// is drawn and stored so that clones replay the same order. Other
    /// patterns never shuffle and discard the seed.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Configuration`] if the block size is zero or
    /// either dimension is not divisible by its magnitude.
    pub fn new(
        shape: (usize, usize),
        block_size: isize,
        axis: PrimaryAxis,
        pattern: Pattern,
        seed: Option<u64>,
    ) -> Result<Self> {
        let (rows, cols) = shape;
        let magnitude = block_size.unsigned_abs();
        if magnitude == 0 || !rows.is_multiple_of(magnitude) || !cols.is_multiple_of(magnitude) {
            return Err(AlgorithmError::Configuration {
                rows,
                cols,
                block_size,
            });
        }

        let seed = match pattern {
            Pattern::Shuffled => Some(seed.unwrap_or_else(random_seed)),
            Pattern::Sequential | Pattern::Zigzag => None,
        };

        Ok(Self {
            rows,
            cols,
            block_size,
            axis,
            pattern,
            seed,
        })
    }

    /// Iterate over every block corner exactly once
    pub fn corners(&self) -> Corners {
        let walker = StripWalker::new(self);
        match (self.pattern, self.seed) {
            (Pattern::Shuffled, Some(seed)) => {
                let mut all: Vec<Corner> = walker.collect();
                RandomSelector::new(seed).shuffle(&mut all);
                Corners::Materialized(all.into_iter())
            }
            _ => Corners::Strips(walker),
        }
    }

    /// Number of corners produced by one pass
    pub const fn len(&self) -> usize {
        let magnitude = self.block_extent();
        (self.rows / magnitude) * (self.cols / magnitude)
    }

    /// Whether a pass produces no corners
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid shape as `(rows, cols)`
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Signed block size; the sign encodes walking direction
    pub const fn block_size(&self) -> isize {
        self.block_size
    }

    /// Block edge length in pixels
    pub const fn block_extent(&self) -> usize {
        self.block_size.unsigned_abs()
    }

    /// Slow-varying grid dimension
    pub const fn axis(&self) -> PrimaryAxis {
        self.axis
    }

    /// Visiting pattern
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Seed used for shuffling; `None` unless the pattern is shuffled
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Positions along one dimension, stepped by the block size
#[derive(Debug, Clone, Copy)]
struct AxisSteps {
    count: usize,
    extent: usize,
    reversed: bool,
}

impl AxisSteps {
    const fn new(length: usize, block_size: isize) -> Self {
        let extent = block_size.unsigned_abs();
        Self {
            count: length / extent,
            extent,
            reversed: block_size < 0,
        }
    }

    const fn offset(&self, index: usize) -> usize {
        if self.reversed {
            (self.count - 1 - index) * self.extent
        } else {
            index * self.extent
        }
    }
}

/// Lazy strip-by-strip walk; zigzag flips the fast dimension on odd strips
#[derive(Debug, Clone)]
pub struct StripWalker {
    slow: AxisSteps,
    fast: AxisSteps,
    axis: PrimaryAxis,
    zigzag: bool,
    strip: usize,
    step: usize,
}

impl StripWalker {
    fn new(traversal: &Traversal) -> Self {
        let row_steps = AxisSteps::new(traversal.rows, traversal.block_size);
        let col_steps = AxisSteps::new(traversal.cols, traversal.block_size);
        let (slow, fast) = match traversal.axis {
            PrimaryAxis::Rows => (row_steps, col_steps),
            PrimaryAxis::Columns => (col_steps, row_steps),
        };
        Self {
            slow,
            fast,
            axis: traversal.axis,
            zigzag: traversal.pattern == Pattern::Zigzag,
            strip: 0,
            step: 0,
        }
    }

    const fn remaining(&self) -> usize {
        let total = self.slow.count * self.fast.count;
        total.saturating_sub(self.strip * self.fast.count + self.step)
    }
}

impl Iterator for StripWalker {
    type Item = Corner;

    fn next(&mut self) -> Option<Corner> {
        if self.fast.count == 0 || self.strip >= self.slow.count {
            return None;
        }

        let fast_index = if self.zigzag && self.strip % 2 == 1 {
            self.fast.count - 1 - self.step
        } else {
            self.step
        };
        let slow_offset = self.slow.offset(self.strip);
        let fast_offset = self.fast.offset(fast_index);

        self.step += 1;
        if self.step == self.fast.count {
            self.step = 0;
            self.strip += 1;
        }

        Some(match self.axis {
            PrimaryAxis::Rows => Corner::new(slow_offset, fast_offset),
            PrimaryAxis::Columns => Corner::new(fast_offset, slow_offset),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

/// Iterator over the corners of one traversal pass
#[derive(Debug, Clone)]
pub enum Corners {
    /// Produced lazily strip by strip
    Strips(StripWalker),
    /// Fully materialized up front (shuffled order)
    Materialized(std::vec::IntoIter<Corner>),
}

impl Iterator for Corners {
    type Item = Corner;

    fn next(&mut self) -> Option<Corner> {
        match self {
            Self::Strips(walker) => walker.next(),
            Self::Materialized(corners) => corners.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Strips(walker) => walker.size_hint(),
            Self::Materialized(corners) => corners.size_hint(),
        }
    }
}

impl ExactSizeIterator for Corners {}

impl IntoIterator for &Traversal {
    type Item = Corner;
    type IntoIter = Corners;

    fn into_iter(self) -> Corners {
        self.corners()
    }
}
