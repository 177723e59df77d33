//! Image decoding, block-aligned cropping and encoding

use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use ndarray::{Array3, Axis, Slice};
use std::path::Path;

/// Load an image as an `(height, width, 4)` RGBA grid
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<Array3<u8>> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);

    Array3::from_shape_vec((height, width, 4), rgba.into_raw()).map_err(|e| {
        AlgorithmError::InvalidSourceData {
            reason: format!("decoded pixel buffer has an unexpected length: {e}"),
        }
    })
}

/// Drop trailing rows and columns so both dimensions divide `block_size`
///
/// # Errors
///
/// Returns an error if `block_size` is zero or larger than either dimension.
pub fn crop_to_block_multiple(image: &Array3<u8>, block_size: usize) -> Result<Array3<u8>> {
    if block_size == 0 {
        return Err(invalid_parameter("block_size", &block_size, &"must be positive"));
    }
    let (height, width, _) = image.dim();
    let rows = height - height % block_size;
    let cols = width - width % block_size;
    if rows == 0 || cols == 0 {
        return Err(AlgorithmError::InvalidSourceData {
            reason: format!("a {height}x{width} image holds no complete {block_size}px block"),
        });
    }
    if rows == height && cols == width {
        return Ok(image.clone());
    }
    let mut view = image.view();
    view.slice_axis_inplace(Axis(0), Slice::from(..rows));
    view.slice_axis_inplace(Axis(1), Slice::from(..cols));
    Ok(view.to_owned())
}

/// Convert a grid with 1, 3 or 4 channels into an encodable image
///
/// # Errors
///
/// Returns an error for any other channel count or oversized dimensions.
pub fn to_dynamic_image(grid: &Array3<u8>) -> Result<DynamicImage> {
    let (height, width, channels) = grid.dim();
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(AlgorithmError::InvalidSourceData {
            reason: format!("{height}x{width} exceeds the encodable image size"),
        });
    };
    let raw: Vec<u8> = grid.iter().copied().collect();

    let image = match channels {
        1 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        _ => None,
    };
    image.ok_or_else(|| AlgorithmError::InvalidSourceData {
        reason: format!("cannot encode a grid with {channels} channels"),
    })
}

/// Save a grid to `output_path`, inferring the format from its extension
///
/// # Errors
///
/// Returns an error if the grid cannot be converted, the parent directory
/// cannot be created, or encoding fails.
pub fn save_grid(grid: &Array3<u8>, output_path: &Path) -> Result<()> {
    let image = to_dynamic_image(grid)?;

    create_parent_dir(output_path)?;

    image
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Create the directory that will hold `path`, if it names one
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e)),
        _ => Ok(()),
    }
}
