//! Plain-text record of the parameters behind a forgotten image

use crate::io::configuration::RECORD_EXTENSION;
use crate::io::error::{Result, file_system_error};
use crate::markov::GenerationStats;
use crate::spatial::Arrangement;
use std::fmt;
use std::path::{Path, PathBuf};

/// Parameters and outcome of one forgetting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    /// Block edge length in pixels
    pub block_size: usize,
    /// Traversal arrangement used for both passes
    pub arrangement: Arrangement,
    /// Markov chain order
    pub order: usize,
    /// Seed for shuffling and sampling
    pub seed: u64,
    /// Sampling recovery counters from the regeneration pass
    pub stats: GenerationStats,
    /// Whether the regeneration pass stopped early
    pub exhausted: bool,
}

impl RunRecord {
    /// Write the record next to `output_path` as `<output_path>.log`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_beside(&self, output_path: &Path) -> Result<PathBuf> {
        let path = record_path(output_path);
        std::fs::write(&path, self.to_string())
            .map_err(|e| file_system_error(&path, "write run record", e))?;
        Ok(path)
    }
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "block_size: {}", self.block_size)?;
        writeln!(f, "arrangement: {}", self.arrangement)?;
        writeln!(f, "order: {}", self.order)?;
        writeln!(f, "seed: {}", self.seed)?;
        writeln!(f, "generated: {}", self.stats.generated)?;
        writeln!(f, "fallbacks: {}", self.stats.fallbacks)?;
        writeln!(f, "restarts: {}", self.stats.restarts)?;
        writeln!(f, "exhausted: {}", self.exhausted)
    }
}

/// Path of the record that accompanies `output_path`
pub fn record_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(".");
    name.push(RECORD_EXTENSION);
    PathBuf::from(name)
}
