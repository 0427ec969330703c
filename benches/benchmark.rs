// Performance benchmarks for windowing, alignment and full verification
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docverify_core::{window, HashEmbedder, SimilarityIndex, WindowConfig};
use docverify_engine::Verifier;
use docverify_similarity::{align, FieldValue, GroundTruthRecord};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::sync::Arc;

const VOCABULARY: &[&str] = &[
    "ejendommen", "matrikel", "areal", "skøde", "køber", "sælger", "overtagelse", "den",
    "med", "og", "på", "til", "bygning", "grund", "tinglyst", "servitut", "pris", "kr.",
    "kommune", "vej", "m2", "af", "i", "for",
];

/// Synthetic deed of `words` tokens with the record's values placed near the end
fn generate_document(words: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tokens: Vec<String> = (0..words)
        .map(|_| match rng.random_range(0..10) {
            0 => rng.random_range(1..10_000).to_string(),
            _ => VOCABULARY.choose(&mut rng).unwrap_or(&"og").to_string(),
        })
        .collect();
    let at = words.saturating_sub(words / 5);
    for (offset, token) in ["Ørnevej", "45,", "8000", "Aarhus", "C"].iter().enumerate() {
        tokens.insert(at + offset, token.to_string());
    }
    tokens.extend(["samlet", "areal", "120", "m2"].map(String::from));
    tokens.join(" ")
}

fn record() -> GroundTruthRecord {
    GroundTruthRecord {
        street_name: Some(FieldValue::from("Ørnevej")),
        house_number: Some(FieldValue::from("45")),
        postal_code: Some(FieldValue::from(8000)),
        postal_district: Some(FieldValue::from("Aarhus C")),
        area_size: Some(FieldValue::from(120)),
    }
}

fn benchmark_windowing(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowing");
    let text = generate_document(10_000, 7);

    for config in WindowConfig::defaults() {
        group.bench_with_input(BenchmarkId::new("window", config), &config, |b, &config| {
            b.iter(|| {
                let windows = window(black_box(&text), config).unwrap();
                black_box(windows);
            });
        });
    }

    group.finish();
}

fn benchmark_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");

    for size in [5, 25, 100].iter() {
        let candidate = generate_document(*size, 11);
        group.bench_with_input(BenchmarkId::new("address", size), &candidate, |b, candidate| {
            b.iter(|| {
                let alignment = align(black_box("Ørnevej 45"), black_box(candidate));
                black_box(alignment);
            });
        });
    }

    group.finish();
}

fn benchmark_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    let embedder = HashEmbedder::default();
    let text = generate_document(5_000, 13);
    let windows = window(&text, WindowConfig::new(25, 10)).unwrap();

    group.bench_function("build_25_10", |b| {
        b.iter(|| {
            let index = SimilarityIndex::build(black_box(windows.clone()), &embedder).unwrap();
            black_box(index);
        });
    });

    let index = SimilarityIndex::build(windows, &embedder).unwrap();
    group.bench_function("search_top20", |b| {
        b.iter(|| {
            let hits = index.search(black_box("8000 Aarhus C"), &embedder, 20).unwrap();
            black_box(hits);
        });
    });

    group.finish();
}

fn benchmark_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    group.sample_size(20);

    let verifier = Verifier::new(Arc::new(HashEmbedder::default()));
    let record = record();

    for words in [500, 2_000, 8_000].iter() {
        let text = generate_document(*words, 17);
        group.bench_with_input(BenchmarkId::new("default_configs", words), &text, |b, text| {
            b.iter(|| {
                let report = verifier.verify(black_box(&record), black_box(text)).unwrap();
                black_box(report);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_windowing,
    benchmark_align,
    benchmark_index,
    benchmark_verify
);
criterion_main!(benches);
