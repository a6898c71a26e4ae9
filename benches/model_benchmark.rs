//! Benchmarks for the epidemic integrator.
//!
//! The weekly advance is the hot path of both the interactive game and the
//! scripted runner.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use outbreak::game::{DistancingLevel, Policy};
use outbreak::model::Population;

fn bench_advance_one_week(c: &mut Criterion) {
    c.bench_function("advance_one_week", |b| {
        b.iter(|| {
            let mut population = Population::with_total(black_box(5_500_000));
            population.advance();
            black_box(population)
        });
    });
}

fn bench_advance_full_year(c: &mut Criterion) {
    c.bench_function("advance_52_weeks", |b| {
        b.iter(|| {
            let mut population = Population::with_total(black_box(5_500_000));
            for _ in 0..52 {
                population.advance();
            }
            black_box(population)
        });
    });
}

fn bench_managed_year(c: &mut Criterion) {
    // The same year with the policy re-applied and income collected each
    // week, as the game loop does
    c.bench_function("managed_52_weeks", |b| {
        b.iter(|| {
            let mut population = Population::with_total(black_box(5_500_000));
            let mut policy = Policy::new();
            policy.set_distancing(DistancingLevel::CircuitBreaker);
            for _ in 0..52 {
                population.apply_policy(&policy);
                population.advance();
                policy.collect_income(population.susceptible_fraction());
            }
            black_box((population, policy))
        });
    });
}

fn bench_summary(c: &mut Criterion) {
    let mut population = Population::with_total(5_500_000);
    for _ in 0..52 {
        population.advance();
    }

    c.bench_function("summary_after_52_weeks", |b| {
        b.iter(|| black_box(black_box(&population).summary()));
    });
}

criterion_group!(
    benches,
    bench_advance_one_week,
    bench_advance_full_year,
    bench_managed_year,
    bench_summary
);
criterion_main!(benches);
