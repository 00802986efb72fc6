//! RGB pixel value

use crate::error::{EvolveError, EvolveResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single RGB color. Channels are stored as `u8`, so every value is in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b }
    }

    /// Build a pixel from wide integers, clamping each channel into 0..=255
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let clamp = |v: i64| v.clamp(0, 255) as u8;
        Pixel::new(clamp(r), clamp(g), clamp(b))
    }

    /// Build a pixel from wide integers, rejecting any channel outside 0..=255
    pub fn try_from_channels(r: i64, g: i64, b: i64) -> EvolveResult<Self> {
        let check = |v: i64| u8::try_from(v).map_err(|_| EvolveError::ChannelOutOfRange(v));
        Ok(Pixel::new(check(r)?, check(g)?, check(b)?))
    }

    /// Fresh pixel with each channel drawn independently and uniformly from 0..=255
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Pixel::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// Sum of absolute per-channel differences, in 0..=765
    pub fn distance(&self, other: &Pixel) -> u32 {
        u32::from(self.r.abs_diff(other.r))
            + u32::from(self.g.abs_diff(other.g))
            + u32::from(self.b.abs_diff(other.b))
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Pixel::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Pixel::new(r, g, b)
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(pixel: Pixel) -> Self {
        pixel.channels()
    }
}
