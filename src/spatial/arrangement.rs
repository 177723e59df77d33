//! Named block arrangements
//!
//! An arrangement is the user-facing name for an axis, direction and pattern
//! combination. Each variant resolves to exactly one traversal configuration.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::traversal::{Pattern, PrimaryAxis, Traversal};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Named traversal arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Arrangement {
    /// Row by row from the top-left corner
    Row,
    /// Row by row from the bottom-right corner
    RowReverse,
    /// Column by column from the top-left corner
    Column,
    /// Column by column from the bottom-right corner
    ColumnReverse,
    /// Rows alternating left-to-right and right-to-left
    Zigzag,
    /// Columns alternating top-to-bottom and bottom-to-top
    ColumnZigzag,
    /// Every block exactly once in a seeded random order
    Random,
}

impl Arrangement {
    /// All arrangements in declaration order
    pub const ALL: [Self; 7] = [
        Self::Row,
        Self::RowReverse,
        Self::Column,
        Self::ColumnReverse,
        Self::Zigzag,
        Self::ColumnZigzag,
        Self::Random,
    ];

    /// Canonical kebab-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::RowReverse => "row-reverse",
            Self::Column => "column",
            Self::ColumnReverse => "column-reverse",
            Self::Zigzag => "zigzag",
            Self::ColumnZigzag => "column-zigzag",
            Self::Random => "random",
        }
    }

    /// Primary axis, walking direction and pattern for this arrangement
    pub const fn parts(self) -> (PrimaryAxis, bool, Pattern) {
        match self {
            Self::Row => (PrimaryAxis::Rows, false, Pattern::Sequential),
            Self::RowReverse => (PrimaryAxis::Rows, true, Pattern::Sequential),
            Self::Column => (PrimaryAxis::Columns, false, Pattern::Sequential),
            Self::ColumnReverse => (PrimaryAxis::Columns, true, Pattern::Sequential),
            Self::Zigzag => (PrimaryAxis::Rows, false, Pattern::Zigzag),
            Self::ColumnZigzag => (PrimaryAxis::Columns, false, Pattern::Zigzag),
            Self::Random => (PrimaryAxis::Rows, false, Pattern::Shuffled),
        }
    }

    /// Resolve into a traversal over a `(rows, cols)` grid
    ///
    /// # Errors
    ///
    /// Returns an error if the block size is zero, too large, or does not
    /// divide the grid.
    pub fn traversal(
        self,
        shape: (usize, usize),
        block_size: usize,
        seed: Option<u64>,
    ) -> Result<Traversal> {
        let magnitude = isize::try_from(block_size)
            .map_err(|err| invalid_parameter("block_size", &block_size, &err))?;
        let (axis, reversed, pattern) = self.parts();
        let signed = if reversed { -magnitude } else { magnitude };
        Traversal::new(shape, signed, axis, pattern, seed)
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Arrangement {
    type Err = crate::io::error::AlgorithmError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|arrangement| arrangement.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.into_iter().map(Self::name).collect();
                invalid_parameter(
                    "arrangement",
                    &name,
                    &format!("unknown arrangement, expected one of: {}", known.join(", ")),
                )
            })
    }
}
