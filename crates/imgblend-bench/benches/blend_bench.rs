//! Benchmarks for imgblend operations.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use imgblend_color::{from_hsla, to_hsla};
use imgblend_core::{Image, Rgba8};
use imgblend_ops::composite::{composite_pixel, CompositeOptions, Compositor};
use imgblend_ops::modes::Dissolve;
use imgblend_ops::{fade, BlendMode};

fn test_image(size: u32, seed: u32) -> Image {
    Image::from_fn(size, size, |x, y| {
        Rgba8::new(
            (x.wrapping_mul(31).wrapping_add(seed) % 256) as u8,
            (y.wrapping_mul(17).wrapping_add(seed) % 256) as u8,
            ((x ^ y).wrapping_add(seed) % 256) as u8,
            ((x + y).wrapping_mul(seed | 1) % 256) as u8,
        )
    })
}

/// Benchmark every blend mode through the default compositor.
fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("modes");

    let size = 256u32;
    let backdrop = test_image(size, 3);
    let source = test_image(size, 101);
    group.throughput(Throughput::Elements((size * size) as u64));

    let compositor = Compositor::default();
    for mode in BlendMode::ALL {
        group.bench_with_input(BenchmarkId::new("blend", mode), &mode, |b, &mode| {
            b.iter(|| compositor.blend(black_box(&backdrop), black_box(&source), mode))
        });
    }

    group.finish();
}

/// Benchmark sequential vs parallel traversal across image sizes.
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    let sequential = Compositor::sequential();
    let parallel = Compositor::with_options(CompositeOptions::default().with_parallel(true));

    for size in [64u32, 512, 2048].iter() {
        let backdrop = test_image(*size, 7);
        let source = test_image(*size, 211);
        group.throughput(Throughput::Elements((*size as u64) * (*size as u64)));

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| sequential.blend(black_box(&backdrop), black_box(&source), BlendMode::Multiply))
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| parallel.blend(black_box(&backdrop), black_box(&source), BlendMode::Multiply))
        });
    }

    group.finish();
}

/// Benchmark per-pixel building blocks.
fn bench_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel");

    let pixels: Vec<Rgba8> = (0..10000u32)
        .map(|i| Rgba8::new((i % 256) as u8, (i / 7 % 256) as u8, (i / 13 % 256) as u8, (i / 3 % 256) as u8))
        .collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    group.bench_function("composite_pixel", |b| {
        b.iter(|| {
            pixels
                .windows(2)
                .map(|w| composite_pixel(black_box(w[0]), black_box(w[1]), w[1]))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("hsl_round_trip", |b| {
        b.iter(|| pixels.iter().map(|&p| from_hsla(to_hsla(black_box(p)))).collect::<Vec<_>>())
    });

    group.finish();
}

/// Benchmark Dissolve with a seeded source and layer fading.
fn bench_misc(c: &mut Criterion) {
    let mut group = c.benchmark_group("misc");

    let size = 512u32;
    let backdrop = test_image(size, 1);
    let source = test_image(size, 2);
    group.throughput(Throughput::Elements((size * size) as u64));

    group.bench_function("dissolve_seeded", |b| {
        b.iter(|| Compositor::sequential().composite(&backdrop, &source, &Dissolve::seeded(42)))
    });

    group.bench_function("fade", |b| b.iter(|| fade(black_box(&source), 0.5)));

    group.finish();
}

criterion_group!(benches, bench_modes, bench_traversal, bench_pixel, bench_misc);
criterion_main!(benches);
