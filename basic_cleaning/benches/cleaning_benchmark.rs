use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polars::prelude::*;

use basic_cleaning::time::parse_review_timestamp;
use basic_cleaning::transformations::{filter_by_geo_bounds, filter_by_price, normalize_last_review};
use basic_cleaning::{GeoBounds, PriceRange};

fn synthetic_listings(rows: usize) -> DataFrame {
    let prices: Vec<String> = (0..rows).map(|i| ((i * 37) % 1200).to_string()).collect();
    let longitudes: Vec<String> = (0..rows)
        .map(|i| format!("{:.5}", -74.4 + (i % 1000) as f64 * 0.001))
        .collect();
    let latitudes: Vec<String> = (0..rows)
        .map(|i| format!("{:.5}", 40.4 + (i % 900) as f64 * 0.001))
        .collect();
    let reviews: Vec<String> = (0..rows)
        .map(|i| format!("2019-{:02}-{:02}", i % 12 + 1, i % 28 + 1))
        .collect();

    df! {
        "price" => prices,
        "longitude" => longitudes,
        "latitude" => latitudes,
        "last_review" => reviews,
    }
    .expect("valid frame")
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    for rows in [1_000usize, 50_000] {
        let df = synthetic_listings(rows);
        group.bench_with_input(BenchmarkId::new("price_then_geo", rows), &df, |b, df| {
            b.iter(|| {
                let priced = filter_by_price(black_box(df), PriceRange::new(10.0, 350.0)).unwrap();
                black_box(filter_by_geo_bounds(&priced, &GeoBounds::NYC).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_review_dates(c: &mut Criterion) {
    let mut group = c.benchmark_group("review_dates");

    group.bench_function("parse_single", |b| {
        b.iter(|| black_box(parse_review_timestamp(black_box("2019-05-21"))));
    });

    let df = synthetic_listings(50_000);
    group.bench_function("normalize_column", |b| {
        b.iter(|| {
            let mut frame = df.clone();
            black_box(normalize_last_review(&mut frame).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_filters, bench_review_dates);
criterion_main!(benches);
