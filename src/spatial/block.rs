//! Content-addressed image blocks
//!
//! A [`Block`] owns a copy of one `size x size x channels` tile. Equality and
//! hashing are defined by the grid contents, so blocks can be used directly as
//! Markov chain symbols.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::traversal::Corner;
use ndarray::{Array3, ArrayView3, Axis, Slice};

/// One fixed-size tile of an image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    grid: Array3<u8>,
}

impl Block {
    /// Wrap an owned grid of shape `(size, size, channels)`
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is not square in its first two dimensions
    /// or has no channels.
    pub fn from_grid(grid: Array3<u8>) -> Result<Self> {
        let (rows, cols, channels) = grid.dim();
        if rows != cols || rows == 0 || channels == 0 {
            return Err(invalid_parameter(
                "grid",
                &format!("{rows}x{cols}x{channels}"),
                &"block grids must be square and non-empty",
            ));
        }
        Ok(Self { grid })
    }

    /// Copy the block whose top-left pixel is `corner` out of `source`
    ///
    /// The returned block never aliases `source`; later writes to the image
    /// leave it untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the block would extend past the source bounds or
    /// `size` is zero.
    pub fn capture(source: ArrayView3<'_, u8>, corner: Corner, size: usize) -> Result<Self> {
        let (rows, cols, _) = source.dim();
        if size == 0 || corner.row + size > rows || corner.col + size > cols {
            return Err(invalid_parameter(
                "corner",
                &corner,
                &format!("block of size {size} does not fit in a {rows}x{cols} grid"),
            ));
        }
        let mut view = source;
        view.slice_axis_inplace(Axis(0), Slice::from(corner.row..corner.row + size));
        view.slice_axis_inplace(Axis(1), Slice::from(corner.col..corner.col + size));
        Self::from_grid(view.to_owned())
    }

    /// Write this block's pixels into `target` at `corner`
    ///
    /// # Errors
    ///
    /// Returns an error if the block does not fit or the channel counts differ.
    pub fn write_into(&self, target: &mut Array3<u8>, corner: Corner) -> Result<()> {
        let (rows, cols, channels) = target.dim();
        let size = self.size();
        if corner.row + size > rows || corner.col + size > cols || channels != self.channels() {
            return Err(invalid_parameter(
                "corner",
                &corner,
                &format!(
                    "block {size}x{size}x{} does not fit in a {rows}x{cols}x{channels} grid",
                    self.channels()
                ),
            ));
        }
        let mut region = target.view_mut();
        region.slice_axis_inplace(Axis(0), Slice::from(corner.row..corner.row + size));
        region.slice_axis_inplace(Axis(1), Slice::from(corner.col..corner.col + size));
        region.assign(&self.grid);
        Ok(())
    }

    /// Edge length in pixels
    pub fn size(&self) -> usize {
        self.grid.dim().0
    }

    /// Number of color channels per pixel
    pub fn channels(&self) -> usize {
        self.grid.dim().2
    }

    /// Read-only access to the pixel grid
    pub const fn grid(&self) -> &Array3<u8> {
        &self.grid
    }
}
