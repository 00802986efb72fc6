//! Fixed-size pixel grids: evolving candidates and the reference target

use super::pixel::Pixel;
use crate::error::{EvolveError, EvolveResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, Index, IndexMut};

/// Width and height of the grid
pub const GRID_SIDE: usize = 16;

/// Number of pixels in every candidate and in the reference
pub const GENOME_LEN: usize = GRID_SIDE * GRID_SIDE;

/// One trial solution: exactly [`GENOME_LEN`] pixels in raster order.
///
/// Cloning produces an independent copy, so mutating one candidate never
/// affects another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pixel>", into = "Vec<Pixel>")]
pub struct Candidate {
    pixels: Vec<Pixel>,
}

impl Candidate {
    /// Wrap a pixel sequence, rejecting anything that is not exactly one grid long
    pub fn from_pixels(pixels: Vec<Pixel>) -> EvolveResult<Self> {
        if pixels.len() != GENOME_LEN {
            return Err(EvolveError::LengthMismatch {
                expected: GENOME_LEN,
                actual: pixels.len(),
            });
        }
        Ok(Candidate { pixels })
    }

    /// Every cell set to the same color
    pub fn filled(pixel: Pixel) -> Self {
        Candidate {
            pixels: vec![pixel; GENOME_LEN],
        }
    }

    /// Every cell drawn independently with [`Pixel::random`]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Candidate {
            pixels: (0..GENOME_LEN).map(|_| Pixel::random(rng)).collect(),
        }
    }

    /// Build from a per-position generator
    pub(crate) fn from_fn(f: impl FnMut(usize) -> Pixel) -> Self {
        Candidate {
            pixels: (0..GENOME_LEN).map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }

    /// Replace one pixel, returning the one it displaced
    pub fn set(&mut self, index: usize, pixel: Pixel) -> Pixel {
        std::mem::replace(&mut self.pixels[index], pixel)
    }

    /// Number of positions at which the two grids differ
    pub fn diff_positions(&self, other: &Candidate) -> usize {
        self.pixels
            .iter()
            .zip(&other.pixels)
            .filter(|(a, b)| a != b)
            .count()
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}

impl Index<usize> for Candidate {
    type Output = Pixel;

    fn index(&self, index: usize) -> &Pixel {
        &self.pixels[index]
    }
}

impl IndexMut<usize> for Candidate {
    fn index_mut(&mut self, index: usize) -> &mut Pixel {
        &mut self.pixels[index]
    }
}

impl TryFrom<Vec<Pixel>> for Candidate {
    type Error = EvolveError;

    fn try_from(pixels: Vec<Pixel>) -> EvolveResult<Self> {
        Candidate::from_pixels(pixels)
    }
}

impl From<Candidate> for Vec<Pixel> {
    fn from(candidate: Candidate) -> Self {
        candidate.pixels
    }
}

impl<'a> IntoIterator for &'a Candidate {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

/// The fixed optimization target.
///
/// Read-only once built; dereferences to [`Candidate`] so it can be scored
/// with the same functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(Candidate);

impl Reference {
    pub fn new(pixels: Candidate) -> Self {
        Reference(pixels)
    }

    pub fn from_pixels(pixels: Vec<Pixel>) -> EvolveResult<Self> {
        Candidate::from_pixels(pixels).map(Reference)
    }

    pub fn filled(pixel: Pixel) -> Self {
        Reference(Candidate::filled(pixel))
    }

    pub fn as_candidate(&self) -> &Candidate {
        &self.0
    }
}

impl Deref for Reference {
    type Target = Candidate;

    fn deref(&self) -> &Candidate {
        &self.0
    }
}

impl From<Candidate> for Reference {
    fn from(candidate: Candidate) -> Self {
        Reference(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_pixels_length_check() {
        assert!(Candidate::from_pixels(vec![Pixel::BLACK; GENOME_LEN]).is_ok());
        assert_eq!(
            Candidate::from_pixels(vec![Pixel::BLACK; 255]),
            Err(EvolveError::LengthMismatch { expected: 256, actual: 255 })
        );
        assert_eq!(
            Reference::from_pixels(vec![]),
            Err(EvolveError::LengthMismatch { expected: 256, actual: 0 })
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Candidate::filled(Pixel::BLACK);
        let mut copy = original.clone();
        copy[3] = Pixel::WHITE;

        assert_eq!(original[3], Pixel::BLACK);
        assert_eq!(copy[3], Pixel::WHITE);
        assert_eq!(original.diff_positions(&copy), 1);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut c = Candidate::filled(Pixel::new(1, 2, 3));
        let old = c.set(255, Pixel::WHITE);
        assert_eq!(old, Pixel::new(1, 2, 3));
        assert_eq!(c[255], Pixel::WHITE);
        assert_eq!(c.len(), GENOME_LEN);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let c = Candidate::filled(Pixel::BLACK);
        let _ = c[GENOME_LEN];
    }

    #[test]
    fn test_random_has_full_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = Candidate::random(&mut rng);
        assert_eq!(c.len(), GENOME_LEN);
        assert_eq!(c.iter().count(), GENOME_LEN);
    }

    #[test]
    fn test_serde_rejects_short_grid() {
        let c = Candidate::filled(Pixel::new(9, 8, 7));
        let json = serde_json::to_string(&c).unwrap();
        let back: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);

        let short = serde_json::to_string(&vec![Pixel::BLACK; 10]).unwrap();
        assert!(serde_json::from_str::<Candidate>(&short).is_err());
    }

    #[test]
    fn test_reference_derefs_to_candidate() {
        let reference = Reference::filled(Pixel::WHITE);
        assert_eq!(reference.len(), GENOME_LEN);
        assert_eq!(reference[17], Pixel::WHITE);
        assert_eq!(reference.as_candidate(), &Candidate::filled(Pixel::WHITE));
    }
}
