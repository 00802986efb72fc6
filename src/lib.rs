//! Mosaica
//!
//! Evolves a population of 16x16 RGB pixel grids toward a fixed reference
//! image with a generational genetic algorithm: rank by color distance, cull,
//! then refill through crossover and single-pixel mutation.
//!
//! # Architecture
//!
//! - [`genome`]: `Pixel`, `Candidate` (exactly 256 pixels) and `Reference`
//! - [`fitness`]: summed per-channel absolute distance, lower is better
//! - [`population`]: ranking and culling policies
//! - [`reproduction`]: crossover, mutation and refill
//! - [`evolution`]: the generation loop and its stopping rules
//!
//! Loading the reference from an image file and writing the winner back out
//! live in the `mosaica-raster` crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use mosaica::{evolve, EvolutionConfig, Pixel, Reference, RunState};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let reference = Reference::filled(Pixel::BLACK);
//! let config = EvolutionConfig { max_epochs: 50, ..Default::default() };
//!
//! let result = evolve(reference, config, StdRng::seed_from_u64(42)).unwrap();
//! assert!(result.generations <= 50);
//! assert!(matches!(result.state, RunState::Converged | RunState::Exhausted));
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genome;
pub mod population;
pub mod reproduction;

// Re-export main types for convenience
pub use config::{
    EvolutionConfig, ALTERNATING_CROSSOVER_THRESHOLD, DESIRED_FITNESS, DROP_FRACTION,
    MAX_EPOCHS, MUTATION_PROBABILITY, POPULATION_SIZE,
};
pub use error::{EvolveError, EvolveResult};
pub use evolution::{
    evolve, Evolution, EvolutionResult, GenerationReport, RunState, INITIAL_BEST_SCORE,
};
pub use fitness::{score, score_all, Fitness, MAX_FITNESS, SCORED_POSITIONS};
pub use genome::{Candidate, Pixel, Reference, GENOME_LEN, GRID_SIDE};
pub use population::{CullOutcome, CullPolicy, Population};
pub use reproduction::{alternating_crossover, midpoint_crossover, CrossoverStrategy, Reproduction};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
