// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the quadscan-document crate: corner
// classification, handle hit-testing, and the segment + extract stages on a
// synthetic photo.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};

use quadscan_core::{Point, PointSet, ScanConfig};
use quadscan_document::ScanPipeline;
use quadscan_document::corners::{classify, nearest};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Classify a 64-point outline of a rotated page.
fn bench_classify(c: &mut Criterion) {
    let outline: Vec<Point> = (0..64)
        .map(|i| {
            let t = i as f64 / 64.0 * std::f64::consts::TAU;
            Point::new(
                (500.0 + 300.0 * t.cos() + 40.0 * t.sin()) as i32,
                (400.0 + 200.0 * t.sin() - 30.0 * t.cos()) as i32,
            )
        })
        .collect();

    c.bench_function("classify (64 points)", |b| {
        b.iter(|| black_box(classify(black_box(&outline))));
    });
}

/// Hit-test one press against the four handles.
fn bench_nearest(c: &mut Criterion) {
    let points = PointSet::new(
        Point::new(100, 100),
        Point::new(1000, 120),
        Point::new(980, 900),
        Point::new(90, 880),
    );
    c.bench_function("nearest handle", |b| {
        b.iter(|| black_box(nearest(black_box(Point::new(950, 870)), &points)));
    });
}

/// Segment and extract the outline of a 200x200 synthetic photo: dark
/// desk, bright page from (30, 30) to (170, 170).
fn bench_detect(c: &mut Criterion) {
    let mut img = GrayImage::from_pixel(200, 200, Luma([30u8]));
    for y in 30..170 {
        for x in 30..170 {
            img.put_pixel(x, y, Luma([240u8]));
        }
    }
    let photo = DynamicImage::ImageLuma8(img);
    let pipeline = ScanPipeline::new(ScanConfig::default()).expect("default config is valid");

    c.bench_function("segment + extract (200x200)", |b| {
        b.iter(|| {
            let mask = pipeline.segment(black_box(&photo));
            black_box(mask.and_then(|m| pipeline.extract_polygon(&m)))
        });
    });
}

criterion_group!(benches, bench_classify, bench_nearest, bench_detect);
criterion_main!(benches);
