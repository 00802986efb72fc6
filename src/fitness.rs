//! Fitness evaluation
//!
//! A candidate's fitness is the summed per-channel absolute color distance to
//! the reference. Lower is better; zero is an exact match on every scored cell.

use crate::genome::{Candidate, GENOME_LEN};

/// Fitness score type
pub type Fitness = u32;

/// Number of leading grid positions that take part in scoring.
///
/// The last cell of the grid is not scored.
pub const SCORED_POSITIONS: usize = GENOME_LEN - 1;

/// Largest score any candidate can reach
pub const MAX_FITNESS: Fitness = (SCORED_POSITIONS as Fitness) * 3 * 255;

/// Score one candidate against the reference
pub fn score(candidate: &Candidate, reference: &Candidate) -> Fitness {
    candidate.pixels()[..SCORED_POSITIONS]
        .iter()
        .zip(&reference.pixels()[..SCORED_POSITIONS])
        .map(|(c, r)| c.distance(r))
        .sum()
}

/// Score every candidate, aligned by index with the input
pub fn score_all<'a, I>(candidates: I, reference: &Candidate) -> Vec<Fitness>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    candidates
        .into_iter()
        .map(|candidate| score(candidate, reference))
        .collect()
}
