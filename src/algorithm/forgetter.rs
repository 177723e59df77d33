//! Learning and regeneration passes over an image's blocks
//!
//! The forgetter slices the image into blocks following a traversal, learns a
//! Markov chain over that block sequence, then walks a clone of the same
//! traversal and overwrites every block with one sampled from the chain.

use crate::io::configuration::{
    DEFAULT_BLOCK_SIZE, DEFAULT_ORDER, DEFAULT_SEED, MAX_RESTART_ATTEMPTS,
};
use crate::io::error::Result;
use crate::io::image::{crop_to_block_multiple, load_rgba};
use crate::markov::{GenerationContext, GenerationStats, MarkovChain};
use crate::spatial::{Arrangement, Block, Corner, Traversal};
use ndarray::Array3;
use std::path::Path;

/// Parameters controlling block size, traversal and chain order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForgetterConfig {
    /// Markov chain order
    pub order: usize,
    /// Block edge length in pixels
    pub block_size: usize,
    /// Traversal used for both passes
    pub arrangement: Arrangement,
    /// Seed for shuffled traversals and block sampling
    pub seed: u64,
    /// Whether learned sequences are framed with boundary markers
    pub pad: bool,
    /// Boundary restarts allowed per sampled block before the pass stops
    pub max_restarts: usize,
}

impl Default for ForgetterConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            block_size: DEFAULT_BLOCK_SIZE,
            arrangement: Arrangement::Row,
            seed: DEFAULT_SEED,
            pad: true,
            max_restarts: MAX_RESTART_ATTEMPTS,
        }
    }
}

/// Outcome of one regeneration pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForgetSummary {
    /// Blocks overwritten with sampled content
    pub written: usize,
    /// Blocks visited by a full pass
    pub total: usize,
    /// Sampling recovery counters
    pub stats: GenerationStats,
    /// Whether the pass stopped early because generation was exhausted
    pub exhausted: bool,
}

impl ForgetSummary {
    /// Whether every block of the pass was rewritten
    pub const fn is_complete(&self) -> bool {
        self.written == self.total
    }
}

/// Owns the working image, its traversal and the learned chain
#[derive(Debug, Clone)]
pub struct Forgetter {
    image: Array3<u8>,
    config: ForgetterConfig,
    traversal: Traversal,
    chain: MarkovChain<Block>,
}

impl Forgetter {
    /// Crop `image` to whole blocks and learn its block sequence
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The block size is zero or larger than the image
    /// - The chain order is zero
    pub fn new(image: &Array3<u8>, config: ForgetterConfig) -> Result<Self> {
        let image = crop_to_block_multiple(image, config.block_size)?;
        let (rows, cols, _) = image.dim();
        let traversal = config
            .arrangement
            .traversal((rows, cols), config.block_size, Some(config.seed))?;
        let chain =
            MarkovChain::new(config.order, config.pad)?.with_max_restarts(config.max_restarts);

        let mut forgetter = Self {
            image,
            config,
            traversal,
            chain,
        };
        forgetter.relearn()?;
        Ok(forgetter)
    }

    /// Load an image from disk and learn it
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded or [`Self::new`] fails.
    pub fn from_path<P: AsRef<Path>>(path: P, config: ForgetterConfig) -> Result<Self> {
        let image = load_rgba(path)?;
        Self::new(&image, config)
    }

    /// Capture the current image as a block sequence in traversal order
    ///
    /// # Errors
    ///
    /// Returns an error if a corner falls outside the image.
    pub fn block_sequence(&self) -> Result<Vec<Block>> {
        let extent = self.traversal.block_extent();
        self.traversal
            .corners()
            .map(|corner| Block::capture(self.image.view(), corner, extent))
            .collect()
    }

    /// Learn the current image again, accumulating into the same chain
    ///
    /// Returns the number of blocks learned.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocks cannot be captured.
    pub fn relearn(&mut self) -> Result<usize> {
        let sequence = self.block_sequence()?;
        let learned = sequence.len();
        self.chain.learn([sequence]);
        Ok(learned)
    }

    /// Replace every block of the image with a sampled one
    ///
    /// # Errors
    ///
    /// See [`Self::forget_with`].
    pub fn forget(&mut self) -> Result<ForgetSummary> {
        self.forget_with(|_, _| Ok(()))
    }

    /// Replace every block, calling `observer` after each write
    ///
    /// Exhausted generation ends the pass early and is reported through
    /// [`ForgetSummary::exhausted`]; the blocks written so far stay in place.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails for any reason other than
    /// exhaustion, a block cannot be written, or `observer` fails.
    pub fn forget_with<F>(&mut self, mut observer: F) -> Result<ForgetSummary>
    where
        F: FnMut(Corner, &Array3<u8>) -> Result<()>,
    {
        // Sampling draws from a stream independent of the shuffle
        let mut context = GenerationContext::new(self.config.seed.wrapping_add(1));
        let replay = self.traversal.clone();
        let mut written = 0;
        let mut exhausted = false;

        for corner in &replay {
            let block = match self.chain.generate_next(&mut context, None) {
                Ok(block) => block,
                Err(err) if err.is_recoverable() => {
                    exhausted = true;
                    break;
                }
                Err(err) => return Err(err),
            };
            block.write_into(&mut self.image, corner)?;
            written += 1;
            observer(corner, &self.image)?;
        }

        Ok(ForgetSummary {
            written,
            total: replay.len(),
            stats: context.stats(),
            exhausted,
        })
    }

    /// Current working image
    pub const fn image(&self) -> &Array3<u8> {
        &self.image
    }

    /// Consume the forgetter, returning the working image
    pub fn into_image(self) -> Array3<u8> {
        self.image
    }

    /// Learned chain
    pub const fn chain(&self) -> &MarkovChain<Block> {
        &self.chain
    }

    /// Traversal shared by both passes
    pub const fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// Configuration the forgetter was built with
    pub const fn config(&self) -> &ForgetterConfig {
        &self.config
    }
}
