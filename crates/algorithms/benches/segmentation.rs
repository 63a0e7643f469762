//! Benchmarks for distance, labelling and watershed

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morpho_algorithms::distance::compute_distance;
use morpho_algorithms::labelling::label;
use morpho_algorithms::segmentation::{enhanced_waterfalls, valued_watershed};
use morpho_core::prelude::*;

/// Create a relief of several bowls: distance to the nearest of a few
/// centres plus a small deterministic ripple.
fn create_bowls(size: usize) -> Image {
    let mut im = Image::new(size, size, Depth::Grey).unwrap();
    let centres = [(size / 4, size / 4), (3 * size / 4, size / 3), (size / 2, 3 * size / 4)];
    let values: Vec<u32> = (0..size * size)
        .map(|i| {
            let (x, y) = ((i % size) as f64, (i / size) as f64);
            let d = centres
                .iter()
                .map(|&(cx, cy)| ((x - cx as f64).powi(2) + (y - cy as f64).powi(2)).sqrt())
                .fold(f64::MAX, f64::min);
            let ripple = ((i * 7) % 5) as f64;
            ((d * 255.0 / size as f64) + ripple).min(255.0) as u32
        })
        .collect();
    im.load_values(&values).unwrap();
    im
}

fn create_particles(size: usize) -> Image {
    let mut im = Image::new(size, size, Depth::Binary).unwrap();
    let values: Vec<u32> = (0..size * size)
        .map(|i| (((i / size) / 8 + (i % size) / 8) % 2) as u32)
        .collect();
    im.load_values(&values).unwrap();
    im
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/distance");
    for size in [256, 512, 1024] {
        let image = create_particles(size);
        let mut out = image.blank_like(Depth::Long).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| compute_distance(black_box(&image), &mut out, Grid::Square, Edge::Empty).unwrap())
        });
    }
    group.finish();
}

fn bench_label(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/label");
    for size in [256, 512, 1024] {
        let image = create_particles(size);
        let mut out = image.blank_like(Depth::Long).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| label(black_box(&image), &mut out, Grid::Hexagonal).unwrap())
        });
    }
    group.finish();
}

fn bench_valued_watershed(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/valued_watershed");
    for size in [128, 256, 512] {
        let relief = create_bowls(size);
        let mut out = relief.blank_like(Depth::Long).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| valued_watershed(black_box(&relief), &mut out, Grid::Square).unwrap())
        });
    }
    group.finish();
}

fn bench_waterfalls(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/waterfalls");
    group.sample_size(10);
    for size in [128, 256] {
        let relief = create_bowls(size);
        let mut out = relief.clone();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| enhanced_waterfalls(black_box(&relief), &mut out, Grid::Square).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_distance,
    bench_label,
    bench_valued_watershed,
    bench_waterfalls,
);
criterion_main!(benches);
