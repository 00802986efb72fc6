//! Error types for the evolutionary core

use thiserror::Error;

/// Errors raised while building genomes or configuring a run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvolveError {
    /// A pixel sequence did not have exactly one entry per grid cell
    #[error("Expected {expected} pixels, got {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A color channel fell outside 0..=255
    #[error("Channel value {0} is outside 0..=255")]
    ChannelOutOfRange(i64),

    /// Run configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type EvolveResult<T> = Result<T, EvolveError>;
