//! Genome representation
//!
//! A candidate is a 16x16 grid of RGB pixels stored as a flat sequence of
//! 256 cells. The reference image uses the same shape.

pub mod candidate;
pub mod pixel;

pub use candidate::{Candidate, Reference, GENOME_LEN, GRID_SIDE};
pub use pixel::Pixel;
