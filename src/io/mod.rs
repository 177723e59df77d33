//! Input/output operations, configuration and error handling

/// Command-line parsing and per-file orchestration
pub mod cli;
/// Algorithm constants and runtime configuration defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Image decoding, cropping and encoding
pub mod image;
/// Progress display for regeneration passes
pub mod progress;
/// Plain-text run records
pub mod record;
/// Animated GIF capture of the regeneration
pub mod visualization;
