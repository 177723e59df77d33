//! Algorithm constants and runtime configuration defaults

// Default values for configurable parameters
/// Default Markov chain order (number of preceding blocks used as context)
pub const DEFAULT_ORDER: usize = 5;

/// Default edge length of a square block in pixels
pub const DEFAULT_BLOCK_SIZE: usize = 5;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Guards the boundary restart loop against degenerate chains
/// Maximum consecutive boundary samples before generation gives up
pub const MAX_RESTART_ATTEMPTS: usize = 64;

// Output settings
/// Prefix added to output filenames
pub const OUTPUT_PREFIX: &str = "forgotten_";
/// Extension appended to the output path for the run record
pub const RECORD_EXTENSION: &str = "log";
/// Suffix added to the animation filename stem
pub const ANIMATION_SUFFIX: &str = "_forgetting";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on captured animation frames, excluding the final frame
pub const MAX_GIF_FRAMES: usize = 200;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
