//! Population management
//!
//! Holds the candidates of one generation, ranks them against the reference
//! and culls them down to the survivors that seed the next generation.

use crate::fitness::{self, Fitness};
use crate::genome::{Candidate, Reference};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which ranked positions survive culling.
///
/// `k` below is `floor(drop_fraction * N)` and ranks run from 0 (best) to
/// `N - 1` (worst).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullPolicy {
    /// Keep ranks `k-1 ..= N-2`: the window opens one rank early and the
    /// single worst candidate is dropped. With `k == 0` this keeps
    /// everything except the worst. A population of one is kept as is, so
    /// with `N == 1` the worst candidate survives.
    #[default]
    OffsetWindow,
    /// Keep ranks `0 .. N-k`, discarding the `k` worst.
    DropWorst,
}

impl CullPolicy {
    /// Ranked index range retained out of `n` candidates with `k` marked for dropping.
    /// Never empty when `n > 0`.
    pub fn retained_range(self, n: usize, k: usize) -> std::ops::Range<usize> {
        if n == 0 {
            return 0..0;
        }
        let k = k.min(n);
        match self {
            CullPolicy::OffsetWindow => {
                let start = k.saturating_sub(1).min(n - 1);
                let end = (n - 1).max(start + 1);
                start..end
            }
            CullPolicy::DropWorst => 0..(n - k).max(1),
        }
    }
}

/// Result of one culling round
#[derive(Debug, Clone)]
pub struct CullOutcome {
    pub survivors: Population,
    /// Highest (worst) score seen across the population before culling
    pub worst: Fitness,
}

/// An ordered collection of candidates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Population { candidates }
    }

    /// `size` independent random candidates
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Population {
            candidates: (0..size).map(|_| Candidate::random(rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    /// Fitness of every candidate, aligned by index
    pub fn scores(&self, reference: &Reference) -> Vec<Fitness> {
        fitness::score_all(&self.candidates, reference)
    }

    /// Lowest-scoring candidate and its score; the first one wins a tie
    pub fn best(&self, reference: &Reference) -> Option<(&Candidate, Fitness)> {
        self.candidates
            .iter()
            .map(|c| (c, fitness::score(c, reference)))
            .min_by_key(|&(_, score)| score)
    }

    /// Cull with the [`CullPolicy::OffsetWindow`] policy
    pub fn cull(self, reference: &Reference, drop_fraction: f64) -> CullOutcome {
        self.cull_with(reference, drop_fraction, CullPolicy::OffsetWindow)
    }

    /// Rank ascending by fitness (stable, ties keep their original order) and
    /// keep the ranks selected by `policy`.
    pub fn cull_with(self, reference: &Reference, drop_fraction: f64, policy: CullPolicy) -> CullOutcome {
        let scores = self.scores(reference);
        let worst = scores.iter().copied().max().unwrap_or(0);

        let n = self.candidates.len();
        let drop_count = (drop_fraction * n as f64).floor() as usize;
        let keep = policy.retained_range(n, drop_count);

        let mut ranked: Vec<(Candidate, Fitness)> = self.candidates.into_iter().zip(scores).collect();
        ranked.sort_by_key(|&(_, score)| score);

        trace!(n, drop_count, start = keep.start, end = keep.end, ?policy, "culling population");

        let survivors = ranked
            .into_iter()
            .skip(keep.start)
            .take(keep.len())
            .map(|(candidate, _)| candidate)
            .collect();

        CullOutcome {
            survivors: Population::from_candidates(survivors),
            worst,
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
