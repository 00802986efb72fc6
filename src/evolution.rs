//! Generational evolution loop
//!
//! Each generation culls the population against the reference, records the
//! round's worst pre-cull score as the tracked score, and refills the
//! population through crossover and mutation. The loop stops once the tracked
//! score reaches the desired fitness (`Converged`) or the epoch budget runs
//! out (`Exhausted`). Either way the best member of the final population is
//! returned.
//!
//! All randomness comes from the generator handed to [`Evolution::new`], so
//! a seeded generator reproduces a run exactly.

use crate::config::EvolutionConfig;
use crate::error::EvolveResult;
use crate::fitness::{Fitness, MAX_FITNESS};
use crate::genome::{Candidate, Reference};
use crate::population::Population;
use crate::reproduction::Reproduction;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tracked score before the first generation; worse than any real score
pub const INITIAL_BEST_SCORE: Fitness = 200_000;

const _: () = assert!(INITIAL_BEST_SCORE > MAX_FITNESS);

/// Where the loop stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    /// Tracked score reached the desired fitness
    Converged,
    /// Epoch budget used up first
    Exhausted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Per-generation progress, handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: u64,
    /// Worst score of the population before this generation's cull
    pub tracked_score: Fitness,
    pub survivors: usize,
    pub state: RunState,
}

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Lowest-scoring member of the final population
    pub best: Candidate,
    pub best_fitness: Fitness,
    /// Tracked score when the loop stopped
    pub tracked_score: Fitness,
    pub generations: u64,
    pub state: RunState,
    /// Tracked score of every generation, in order
    pub history: Vec<Fitness>,
}

/// Evolution loop state machine. Owns the population, the reference and the
/// random source for the whole run.
pub struct Evolution<R: Rng> {
    config: EvolutionConfig,
    reference: Reference,
    reproduction: Reproduction,
    rng: R,
    population: Population,
    generation: u64,
    best_score: Fitness,
    state: RunState,
    history: Vec<Fitness>,
}

impl<R: Rng> Evolution<R> {
    /// Validate the config and draw the initial random population
    pub fn new(config: EvolutionConfig, reference: Reference, mut rng: R) -> EvolveResult<Self> {
        config.validate()?;
        let population = Population::random(config.population_size, &mut rng);
        let reproduction = Reproduction::from_config(&config);

        let mut evolution = Self {
            config,
            reference,
            reproduction,
            rng,
            population,
            generation: 0,
            best_score: INITIAL_BEST_SCORE,
            state: RunState::Running,
            history: Vec::new(),
        };
        evolution.state = evolution.classify();
        Ok(evolution)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tracked score of the last completed generation
    pub fn best_score(&self) -> Fitness {
        self.best_score
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    fn classify(&self) -> RunState {
        if self.best_score <= self.config.desired_fitness {
            RunState::Converged
        } else if self.generation >= self.config.max_epochs {
            RunState::Exhausted
        } else {
            RunState::Running
        }
    }

    /// Run one cull-then-refill generation. Returns `None` once the loop has
    /// reached a terminal state.
    pub fn step(&mut self) -> Option<GenerationReport> {
        if self.state.is_terminal() {
            return None;
        }

        let population = std::mem::take(&mut self.population);
        let outcome = population.cull_with(&self.reference, self.config.drop_fraction, self.config.cull_policy);
        let survivors = outcome.survivors.len();

        self.best_score = outcome.worst;
        self.population = self
            .reproduction
            .refill(outcome.survivors, self.config.population_size, &mut self.rng);
        self.generation += 1;
        self.history.push(self.best_score);
        self.state = self.classify();

        debug!(
            generation = self.generation,
            tracked_score = self.best_score,
            survivors,
            "generation complete"
        );

        Some(GenerationReport {
            generation: self.generation,
            tracked_score: self.best_score,
            survivors,
            state: self.state,
        })
    }

    /// Run to completion
    pub fn run(self) -> EvolutionResult {
        self.run_with(|_| {})
    }

    /// Run to completion, calling `observer` after every generation
    pub fn run_with<F>(mut self, mut observer: F) -> EvolutionResult
    where
        F: FnMut(&GenerationReport),
    {
        info!(
            population_size = self.config.population_size,
            max_epochs = self.config.max_epochs,
            desired_fitness = self.config.desired_fitness,
            policy = ?self.config.cull_policy,
            "starting evolution"
        );

        while let Some(report) = self.step() {
            observer(&report);
        }
        self.finish()
    }

    /// Pick the best member of the current population and wrap up the run
    pub fn finish(self) -> EvolutionResult {
        let (best, best_fitness) = match self.population.best(&self.reference) {
            Some((candidate, score)) => (candidate.clone(), score),
            // population_size >= 2 is enforced by validation
            None => unreachable!("evolution population is never empty"),
        };

        info!(
            state = ?self.state,
            generations = self.generation,
            tracked_score = self.best_score,
            best_fitness,
            "evolution finished"
        );

        EvolutionResult {
            best,
            best_fitness,
            tracked_score: self.best_score,
            generations: self.generation,
            state: self.state,
            history: self.history,
        }
    }
}

/// Build an [`Evolution`] and run it to completion
pub fn evolve<R: Rng>(reference: Reference, config: EvolutionConfig, rng: R) -> EvolveResult<EvolutionResult> {
    Ok(Evolution::new(config, reference, rng)?.run())
}
