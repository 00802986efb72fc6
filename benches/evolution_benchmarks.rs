use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mosaica::{score, Candidate, CullPolicy, Evolution, EvolutionConfig, Population, Reference, Reproduction};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

/// Benchmark scoring one candidate against the reference
fn bench_fitness(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let reference = Reference::new(Candidate::random(&mut rng));
    let candidate = Candidate::random(&mut rng);

    c.bench_function("fitness_score", |b| {
        b.iter(|| score(black_box(&candidate), black_box(&reference)))
    });
}

/// Benchmark cull plus refill at several population sizes
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let mut rng = StdRng::seed_from_u64(2);
    let reference = Reference::new(Candidate::random(&mut rng));
    let engine = Reproduction::default();

    for size in [10, 100, 1000].iter() {
        let population = Population::random(*size, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let outcome = population.clone().cull_with(&reference, 0.5, CullPolicy::OffsetWindow);
                engine.refill(outcome.survivors, size, &mut rng)
            });
        });
    }
    group.finish();
}

/// Benchmark a short full run
fn bench_run(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let reference = Reference::new(Candidate::random(&mut rng));
    let config = EvolutionConfig {
        max_epochs: 100,
        desired_fitness: 0,
        ..Default::default()
    };

    c.bench_function("run_100_epochs", |b| {
        b.iter(|| {
            Evolution::new(config.clone(), reference.clone(), StdRng::seed_from_u64(4))
                .map(|evolution| evolution.run())
        })
    });
}

criterion_group!(benches, bench_fitness, bench_generation, bench_run);
criterion_main!(benches);
