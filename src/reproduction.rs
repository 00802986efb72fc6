//! Reproduction: crossover, mutation and refilling a culled population

use crate::config::EvolutionConfig;
use crate::genome::{Candidate, Pixel, GENOME_LEN};
use crate::population::Population;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How a child was assembled from its two parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverStrategy {
    /// Even positions from the first parent, odd positions from the second
    Alternating,
    /// First half from the first parent, second half from the second
    Midpoint,
}

/// Child taking even positions from `p1` and odd positions from `p2`
pub fn alternating_crossover(p1: &Candidate, p2: &Candidate) -> Candidate {
    Candidate::from_fn(|i| if i % 2 == 0 { p1[i] } else { p2[i] })
}

/// Child taking positions `0..128` from `p1` and `128..256` from `p2`
pub fn midpoint_crossover(p1: &Candidate, p2: &Candidate) -> Candidate {
    let mid = GENOME_LEN / 2;
    Candidate::from_fn(|i| if i < mid { p1[i] } else { p2[i] })
}

/// Generates new candidates from the survivors of a cull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reproduction {
    pub mutation_probability: f64,
    pub alternating_crossover_threshold: f64,
}

impl Default for Reproduction {
    fn default() -> Self {
        Self::from_config(&EvolutionConfig::default())
    }
}

impl Reproduction {
    pub fn new(mutation_probability: f64, alternating_crossover_threshold: f64) -> Self {
        Self {
            mutation_probability,
            alternating_crossover_threshold,
        }
    }

    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self::new(config.mutation_probability, config.alternating_crossover_threshold)
    }

    /// Pick two parents uniformly and independently (they may be the same
    /// candidate) and combine them.
    ///
    /// # Panics
    /// Panics if `parents` is empty.
    pub fn crossover<R: Rng + ?Sized>(&self, parents: &Population, rng: &mut R) -> Candidate {
        self.crossover_with_strategy(parents, rng).0
    }

    /// Same as [`Reproduction::crossover`], also reporting the branch taken
    pub fn crossover_with_strategy<R: Rng + ?Sized>(
        &self,
        parents: &Population,
        rng: &mut R,
    ) -> (Candidate, CrossoverStrategy) {
        assert!(!parents.is_empty(), "crossover needs at least one parent");
        let pool = parents.candidates();
        let p1 = &pool[rng.gen_range(0..pool.len())];
        let p2 = &pool[rng.gen_range(0..pool.len())];

        let chance: f64 = rng.gen();
        if chance > self.alternating_crossover_threshold {
            (alternating_crossover(p1, p2), CrossoverStrategy::Alternating)
        } else {
            (midpoint_crossover(p1, p2), CrossoverStrategy::Midpoint)
        }
    }

    /// With probability `mutation_probability`, replace one uniformly chosen
    /// pixel with a fresh random pixel. Otherwise the candidate comes back untouched.
    pub fn mutate<R: Rng + ?Sized>(&self, mut candidate: Candidate, rng: &mut R) -> Candidate {
        self.mutate_in_place(&mut candidate, rng);
        candidate
    }

    /// In-place variant of [`Reproduction::mutate`]; returns the replaced position, if any
    pub fn mutate_in_place<R: Rng + ?Sized>(&self, candidate: &mut Candidate, rng: &mut R) -> Option<usize> {
        if rng.gen::<f64>() >= self.mutation_probability {
            return None;
        }
        let position = rng.gen_range(0..candidate.len());
        candidate.set(position, Pixel::random(rng));
        Some(position)
    }

    /// Append crossover-then-mutate children until the population holds
    /// `target_size` candidates.
    ///
    /// An empty population is first seeded with one random candidate so there
    /// is something to breed from. A population already at or above the target
    /// is returned as is.
    pub fn refill<R: Rng + ?Sized>(&self, mut population: Population, target_size: usize, rng: &mut R) -> Population {
        if population.is_empty() && target_size > 0 {
            trace!("seeding empty population with a random candidate");
            population.push(Candidate::random(rng));
        }
        while population.len() < target_size {
            let child = self.crossover(&population, rng);
            let child = self.mutate(child, rng);
            population.push(child);
        }
        population
    }
}
