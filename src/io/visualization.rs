//! Frame capture and GIF generation for the regeneration pass

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result, file_system_error};
use crate::io::image::{create_parent_dir, to_dynamic_image};
use image::{Delay, Frame, RgbaImage};
use ndarray::Array3;
use std::path::Path;

/// Captures snapshots of the image while blocks are being replaced
///
/// Snapshots are thinned so that at most `max_frames` are kept regardless of
/// how many blocks the image contains.
pub struct AnimationCapture {
    frames: Vec<RgbaImage>,
    capture_every: usize,
    writes_seen: usize,
}

impl AnimationCapture {
    /// Prepare a capture for a pass of `total_writes` block writes
    pub fn new(total_writes: usize, max_frames: usize) -> Self {
        let capture_every = total_writes.div_ceil(max_frames.max(1)).max(1);
        Self {
            frames: Vec::with_capacity(max_frames.saturating_add(2)),
            capture_every,
            writes_seen: 0,
        }
    }

    /// Store the image as it looks before any block is replaced
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be converted to an image.
    pub fn capture_initial(&mut self, grid: &Array3<u8>) -> Result<()> {
        self.push(grid)
    }

    /// Note one block write, storing a frame when it falls on the capture step
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be converted to an image.
    pub fn record_write(&mut self, grid: &Array3<u8>) -> Result<()> {
        self.writes_seen += 1;
        if self.writes_seen.is_multiple_of(self.capture_every) {
            self.push(grid)?;
        }
        Ok(())
    }

    /// Store the final image unless the last write already produced it
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be converted to an image.
    pub fn finish(&mut self, grid: &Array3<u8>) -> Result<()> {
        if !self.writes_seen.is_multiple_of(self.capture_every) || self.frames.is_empty() {
            self.push(grid)?;
        }
        Ok(())
    }

    /// Number of frames captured so far
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Encode the captured frames as an animated GIF
    ///
    /// Delays shorter than viewers reliably honor are raised to
    /// `VIEWER_MIN_FRAME_DELAY_MS`. The last frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for animation".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(i, img)| {
            // Final frame displays longer for better visibility
            let delay = if i == last { delay_ms * 25 } else { delay_ms };
            Frame::from_parts(img.clone(), 0, 0, Delay::from_numer_denom_ms(delay, 1))
        });

        create_parent_dir(output_path)?;

        let file = std::fs::File::create(output_path)
            .map_err(|e| file_system_error(output_path, "create file", e))?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    fn push(&mut self, grid: &Array3<u8>) -> Result<()> {
        self.frames.push(to_dynamic_image(grid)?.to_rgba8());
        Ok(())
    }
}
