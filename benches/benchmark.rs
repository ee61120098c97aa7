// Throughput benchmarks for the forward and inverse transforms
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flatdoc::prelude::*;
use flatdoc::{flatten, structure, FieldIndex};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Entry {
    id: String,
    word: String,
    rank: u32,
    common: bool,
    meanings: Vec<String>,
}

impl Describe for Entry {
    fn describe() -> TypeDescriptor {
        StructDescriptor::new("Entry")
            .field::<String>("id")
            .field::<String>("word")
            .field::<u32>("rank")
            .field::<bool>("common")
            .field::<Vec<String>>("meanings")
            .build()
    }
}

impl Unpack for Entry {}

fn schema() -> SchemaDefinition {
    SchemaDefinition::new()
        .with_field("word", SchemaType::Text)
        .with_field("rank", SchemaType::Number)
        .with_field("common", SchemaType::Number)
        .with_field("meanings", SchemaType::Text)
        .with_field("updated_at", SchemaType::Date)
}

fn generate_document(id: usize, locales: usize) -> Value {
    let meanings: serde_json::Map<String, serde_json::Value> = (0..locales)
        .map(|l| {
            (
                format!("locale{}", l),
                json!({"value": [format!("meaning {} {}", id, l), format!("sense {} {}", id, l)]}),
            )
        })
        .collect();

    Value::from(json!({
        "_id": format!("entry-{}", id),
        "Word": format!("word{}", id),
        "rank": id,
        "common": id % 2 == 0,
        "meanings": meanings,
        "updatedAt": null,
        "internal": {"revision": id, "tags": ["a", "b"]}
    }))
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let schema = schema();

    for locales in [1, 8, 64].iter() {
        let document = generate_document(42, *locales);
        group.bench_with_input(BenchmarkId::new("locales", locales), &document, |b, document| {
            b.iter(|| normalize(black_box(document.clone()), &schema).unwrap());
        });
    }

    group.finish();
}

fn benchmark_denormalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("denormalize");
    let schema = schema();
    let flat = normalize(generate_document(42, 8), &schema).unwrap();
    let index = FieldIndex::build(&Entry::describe()).unwrap();
    let denormalizer = Denormalizer::new();

    group.bench_function("with_index", |b| {
        b.iter(|| {
            denormalizer
                .denormalize_with_index(black_box(flat.clone()), &index)
                .unwrap()
        });
    });

    group.bench_function("unpack", |b| {
        b.iter(|| unpack::<Entry>(black_box(flat.clone())).unwrap());
    });

    group.finish();
}

fn benchmark_unmarshal_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("unmarshal_slice");
    let schema = schema();

    for size in [10, 100, 1000].iter() {
        let documents: Vec<Value> = (0..*size).map(|i| generate_document(i, 4)).collect();
        let flat = Normalizer::new().normalize_all(documents, &schema).unwrap();
        let body = serde_json::to_vec(&flat).unwrap();

        group.bench_with_input(BenchmarkId::new("documents", size), &body, |b, body| {
            b.iter(|| unmarshal_slice::<Entry>(black_box(body)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");
    let document = generate_document(7, 16);
    let entries = flatten(document.clone(), '_').unwrap();

    group.bench_function("flatten", |b| {
        b.iter(|| flatten(black_box(document.clone()), '_').unwrap());
    });

    group.bench_function("structure", |b| {
        b.iter(|| structure(black_box(entries.clone()), '_'));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_denormalize,
    benchmark_unmarshal_slice,
    benchmark_paths
);
criterion_main!(benches);
