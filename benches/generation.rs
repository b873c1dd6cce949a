//! Benchmarks for one evolutionary generation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use evo_optim::{
    compute::evolution::{Evaluator, GenomeRng, GenotypeLayout, Population},
    schema::{ConstraintMode, FitnessSpec, GeneSpec, GenotypeSchema, PopulationConfig, TestFunction},
};

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    for size in [20, 100, 500, 2000] {
        let mut rng = GenomeRng::new(42);
        let layout = GenotypeLayout::new(&GenotypeSchema::default(), ConstraintMode::Hard);
        let mut population = Population::new(
            layout,
            PopulationConfig {
                size,
                elitism: Some(0.2),
            },
            Evaluator::new(TestFunction::Booth, FitnessSpec::Minimize),
            &mut rng,
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                population.crossover(black_box(0.3), &mut rng).ok();
                population.evaluate().ok();
                population.select(&mut rng);
            });
        });
    }

    group.finish();
}

fn bench_rosenbrock_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("rosenbrock_generation");

    for genes in [2, 8, 32] {
        let schema = GenotypeSchema::new(
            (0..genes)
                .map(|i| GeneSpec::real(format!("x{i}"), -2.0, 2.0))
                .collect(),
        );
        let mut rng = GenomeRng::new(7);
        let layout = GenotypeLayout::new(&schema, ConstraintMode::Soft);
        let mut population = Population::new(
            layout,
            PopulationConfig {
                size: 200,
                elitism: Some(0.1),
            },
            Evaluator::new(TestFunction::Rosenbrock, FitnessSpec::Minimize),
            &mut rng,
        );

        group.bench_with_input(BenchmarkId::from_parameter(genes), &genes, |b, _| {
            b.iter(|| {
                population.evaluate().ok();
                population.select(&mut rng);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generation, bench_rosenbrock_dimensions);
criterion_main!(benches);
