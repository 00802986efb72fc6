//! Raster adapters for Mosaica
//!
//! Converts between image files and the flat 256-pixel grids the evolver
//! works on. Grid position `x * 16 + y` maps to image coordinate `(x, y)`,
//! i.e. the grid is stored column by column. Loading and saving use the same
//! order, so a saved candidate loads back unchanged.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use mosaica::{Candidate, EvolveError, Pixel, Reference, GRID_SIDE};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default edge length of a rendered candidate
pub const DISPLAY_SIZE: u32 = 256;

const SIDE: u32 = GRID_SIDE as u32;

/// Errors from reading or writing images
#[derive(Error, Debug)]
pub enum RasterError {
    /// Decode, encode or file error from the image backend
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Pixel data did not form a valid grid
    #[error("Genome error: {0}")]
    Genome(#[from] EvolveError),

    /// Requested output size cannot hold an image
    #[error("Invalid output size: {0}")]
    InvalidSize(u32),
}

pub type RasterResult<T> = Result<T, RasterError>;

/// Grid index of image coordinate `(x, y)`
pub fn grid_index(x: u32, y: u32) -> usize {
    (x * SIDE + y) as usize
}

/// Open an image file of any supported format and downsample it to a reference grid
pub fn load_reference(path: impl AsRef<Path>) -> RasterResult<Reference> {
    let path = path.as_ref();
    let img = image::open(path)?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "loaded source image");
    reference_from_image(&img)
}

/// Nearest-neighbour downsample to 16x16, dropping alpha
pub fn reference_from_image(img: &DynamicImage) -> RasterResult<Reference> {
    let small = img.resize_exact(SIDE, SIDE, FilterType::Nearest).to_rgb8();
    let mut pixels = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
    for x in 0..SIDE {
        for y in 0..SIDE {
            pixels.push(Pixel::from(small.get_pixel(x, y).0));
        }
    }
    Ok(Reference::from_pixels(pixels)?)
}

/// Draw a candidate at 16x16, then upsample with nearest-neighbour to `size`x`size`
pub fn render(candidate: &Candidate, size: u32) -> RasterResult<RgbImage> {
    if size == 0 {
        return Err(RasterError::InvalidSize(size));
    }
    let grid = RgbImage::from_fn(SIDE, SIDE, |x, y| Rgb(candidate[grid_index(x, y)].channels()));
    if size == SIDE {
        return Ok(grid);
    }
    Ok(imageops::resize(&grid, size, size, FilterType::Nearest))
}

/// Render and save; the file extension picks the format
pub fn save_candidate(candidate: &Candidate, path: impl AsRef<Path>, size: u32) -> RasterResult<()> {
    let path = path.as_ref();
    render(candidate, size)?.save(path)?;
    debug!(path = %path.display(), size, "saved candidate image");
    Ok(())
}
