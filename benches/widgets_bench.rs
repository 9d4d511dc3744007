//! Benchmarks for the widget mapping functions
//!
//! Run with: cargo bench

use bulletin::sources::FeedItem;
use bulletin::widgets::finance::{format_price, DigitGrouping, FinanceItemId};
use bulletin::widgets::news::{clean_description, resolve_image};
use bulletin::widgets::weather::{aqi_info, weather_info};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_description(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            format!(
                "<p><b>Paragraph {}</b> with <a href=\"https://example.com/{}\">a link</a> &amp; some text.</p>",
                i, i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    group.bench_function("weather_info", |b| {
        b.iter(|| {
            for code in 0..100 {
                black_box(weather_info(black_box(code)));
            }
        })
    });

    group.bench_function("aqi_info", |b| {
        b.iter(|| {
            for aqi in (0..300).step_by(5) {
                black_box(aqi_info(black_box(aqi)));
            }
        })
    });

    group.finish();
}

fn bench_descriptions(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptions");

    for size in [1, 10, 100] {
        let html = create_description(size);
        group.throughput(Throughput::Bytes(html.len() as u64));

        group.bench_function(format!("clean_{}", size), |b| {
            b.iter(|| clean_description(black_box(&html)))
        });

        let item = FeedItem {
            description: Some(format!("{}<img src=\"https://img.example.com/a.jpg\">", html)),
            ..Default::default()
        };
        group.bench_function(format!("resolve_image_{}", size), |b| {
            b.iter(|| resolve_image(black_box(&item), "International News"))
        });
    }

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("format_price", |b| {
        b.iter(|| {
            format_price(
                FinanceItemId::Bitcoin,
                black_box(5_612_345.67),
                "₹",
                DigitGrouping::Indian,
            )
        })
    });
}

criterion_group!(benches, bench_classification, bench_descriptions, bench_formatting);
criterion_main!(benches);
