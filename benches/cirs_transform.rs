use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cirs_bench::catalog::generate_catalog;
use cirs_bench::config::BenchConfig;
use cirs_bench::frame::FrameGeometry;
use cirs_bench::transform::{CirsTransformer, PositionTransformer};

fn bench_config() -> BenchConfig {
    BenchConfig::builder().seed(0xC1B5).build().unwrap()
}

/// Same frame for every source: the geometry is computed once.
fn bench_cached(c: &mut Criterion) {
    let config = bench_config();
    let mut rng = config.rng();
    let catalog = generate_catalog(1_000, &mut rng);
    let frame = config.fixed_frame();
    let mut transformer = CirsTransformer::new();

    c.bench_function("cirs_transform/same_frame", |b| {
        b.iter(|| {
            for source in &catalog {
                black_box(transformer.transform(black_box(source), &frame).ok());
            }
        })
    });
}

/// One random frame per source: every call pays for the frame geometry.
fn bench_uncached(c: &mut Criterion) {
    let config = bench_config();
    let mut rng = StdRng::seed_from_u64(0xF4A3E);
    let catalog = generate_catalog(100, &mut rng);
    let mut transformer = CirsTransformer::new();

    c.bench_function("cirs_transform/individual_frames", |b| {
        b.iter_batched(
            || {
                // frames drawn outside the timed section
                (0..catalog.len())
                    .map(|_| config.random_frame(&mut rng).unwrap())
                    .collect::<Vec<_>>()
            },
            |frames| {
                for (source, frame) in catalog.iter().zip(&frames) {
                    black_box(transformer.transform_uncached(source, frame).ok());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_geometry(c: &mut Criterion) {
    let frame = bench_config().fixed_frame();
    c.bench_function("cirs_transform/frame_geometry", |b| {
        b.iter(|| black_box(FrameGeometry::new(black_box(&frame)).ok()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_cached, bench_uncached, bench_geometry
);
criterion_main!(benches);
