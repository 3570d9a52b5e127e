use criterion::{Criterion, criterion_group, criterion_main};
use flashgrid_core::*;
use std::hint::black_box;

fn validate_and_score(c: &mut Criterion) {
    let catalog = LevelCatalog::standard();
    let selections: Vec<CellSet> = catalog
        .iter()
        .map(|level| level.pattern() - CellSet::from_fn(|i| i % 3 == 0) | CellSet::from_fn(|i| i % 7 == 1))
        .collect();

    c.bench_function("validate_score_all_levels", |b| {
        b.iter(|| {
            catalog
                .iter()
                .zip(&selections)
                .map(|(level, &selection)| {
                    let truth = level.pattern();
                    score(&validate(black_box(selection), truth), truth.len())
                })
                .sum::<u32>()
        })
    });
}

fn flash_phase(c: &mut Criterion) {
    c.bench_function("flash_phase_100ms_steps", |b| {
        b.iter(|| {
            let mut session = GameSession::default();
            session.start();
            while session.phase() == Phase::Flashing {
                session.advance(black_box(100));
            }
            session.snapshot()
        })
    });
}

criterion_group!(benches, validate_and_score, flash_phase);
criterion_main!(benches);
