//! Generation benchmarks for battlemap_core.
//!
//! Run with: `cargo bench -p battlemap_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use battlemap_core::battlefield::{Battlefield, BattlefieldRequest};
use battlemap_core::catalog::TerrainCatalog;
use battlemap_core::map_generation::{generate, MapConfig};
use battlemap_core::render::{DebugLevel, MapFrame, TokenFrame};
use battlemap_core::scenario::Scenario;
use battlemap_core::settings::ResourceBudget;
use battlemap_core::tokens::{generate_tokens, TokenLayoutConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

pub fn map_benchmark(c: &mut Criterion) {
    let catalog = TerrainCatalog::standard();
    let mut group = c.benchmark_group("map_generation");

    for seed in [1u32, 42, 9001] {
        let config = MapConfig::default().with_seed(seed);
        group.bench_with_input(BenchmarkId::new("unweighted", seed), &config, |b, config| {
            b.iter(|| generate(black_box(config), catalog, None))
        });
    }

    let weighted = MapConfig::default().with_seed(42).with_weighted(true);
    let budget = ResourceBudget::new(vec![2, 0, 3, 1, 4, 1, 1, 2, 2]);
    group.bench_function("weighted_budgeted", |b| {
        b.iter(|| generate(black_box(&weighted), catalog, Some(budget.clone())))
    });

    group.finish();
}

pub fn token_benchmark(c: &mut Criterion) {
    let catalog = TerrainCatalog::standard();
    let map = generate(&MapConfig::default().with_seed(42), catalog, None)
        .expect("benchmark map generation failed");

    c.bench_function("raze_tokens", |b| {
        b.iter(|| {
            generate_tokens(
                black_box(&map.nodes),
                Scenario::Raze,
                TokenLayoutConfig::default(),
                Some(7),
            )
        })
    });
}

pub fn battlefield_benchmark(c: &mut Criterion) {
    let request = BattlefieldRequest::default()
        .with_map(MapConfig::default().with_seed(42))
        .with_scenario(Scenario::Raze)
        .with_token_seed(7);

    c.bench_function("battlefield_with_frames", |b| {
        b.iter(|| {
            let field = Battlefield::generate(black_box(&request), TerrainCatalog::standard())
                .expect("benchmark battlefield failed");
            let map: MapFrame = field.map_frame(true);
            let tokens: TokenFrame = field.token_frame(DebugLevel::TokenSeparation);
            (map.commands.len(), tokens.commands.len())
        })
    });
}

criterion_group!(benches, map_benchmark, token_benchmark, battlefield_benchmark);
criterion_main!(benches);
