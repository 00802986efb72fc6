//! Run configuration

use crate::error::{EvolveError, EvolveResult};
use crate::fitness::Fitness;
use crate::population::CullPolicy;
use serde::{Deserialize, Serialize};

/// Generation ceiling
pub const MAX_EPOCHS: u64 = 1_000_000;
/// Stop once the tracked score is at or below this
pub const DESIRED_FITNESS: Fitness = 5_000;
/// Population size restored after every generation
pub const POPULATION_SIZE: usize = 10;
/// Share of the ranked population removed by culling
pub const DROP_FRACTION: f64 = 0.5;
/// Chance that a child has one pixel replaced
pub const MUTATION_PROBABILITY: f64 = 0.5;
/// Uniform draws strictly above this pick alternating crossover, otherwise midpoint
pub const ALTERNATING_CROSSOVER_THRESHOLD: f64 = 0.5;

/// Parameters for one evolution run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub max_epochs: u64,
    pub desired_fitness: Fitness,
    pub population_size: usize,
    pub drop_fraction: f64,
    pub mutation_probability: f64,
    pub alternating_crossover_threshold: f64,
    pub cull_policy: CullPolicy,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            max_epochs: MAX_EPOCHS,
            desired_fitness: DESIRED_FITNESS,
            population_size: POPULATION_SIZE,
            drop_fraction: DROP_FRACTION,
            mutation_probability: MUTATION_PROBABILITY,
            alternating_crossover_threshold: ALTERNATING_CROSSOVER_THRESHOLD,
            cull_policy: CullPolicy::default(),
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> EvolveResult<()> {
        if self.population_size < 2 {
            return Err(EvolveError::InvalidConfig(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !(0.0..1.0).contains(&self.drop_fraction) {
            return Err(EvolveError::InvalidConfig(format!(
                "drop_fraction must be in [0, 1), got {}",
                self.drop_fraction
            )));
        }
        for (name, p) in [
            ("mutation_probability", self.mutation_probability),
            ("alternating_crossover_threshold", self.alternating_crossover_threshold),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EvolveError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population_size, 10);
        assert_eq!(config.desired_fitness, 5_000);
        assert_eq!(config.cull_policy, CullPolicy::OffsetWindow);
    }

    #[test]
    fn test_rejects_bad_values() {
        let tiny = EvolutionConfig { population_size: 1, ..Default::default() };
        assert!(matches!(tiny.validate(), Err(EvolveError::InvalidConfig(_))));

        let drop_all = EvolutionConfig { drop_fraction: 1.0, ..Default::default() };
        assert!(drop_all.validate().is_err());

        let nan = EvolutionConfig { drop_fraction: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());

        let mutation = EvolutionConfig { mutation_probability: 1.5, ..Default::default() };
        assert!(mutation.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: EvolutionConfig =
            serde_json::from_str(r#"{"max_epochs": 50, "cull_policy": "drop_worst"}"#).unwrap();
        assert_eq!(config.max_epochs, 50);
        assert_eq!(config.cull_policy, CullPolicy::DropWorst);
        assert_eq!(config.population_size, POPULATION_SIZE);
    }
}
