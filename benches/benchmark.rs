use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fakenews_classifier::{ModelArtifact, Pipeline};
use indexmap::IndexMap;

const VOCAB_SIZE: usize = 20_000;

// deterministic synthetic model, no fitting involved
fn synthetic_pipeline() -> Pipeline {
    let vocabulary: IndexMap<String, usize> =
        (0..VOCAB_SIZE).map(|i| (format!("kata{i}"), i)).collect();
    let idf = (0..VOCAB_SIZE).map(|i| 1.0 + (i % 97) as f64 / 10.0).collect();
    let row: Vec<f64> = (0..VOCAB_SIZE).map(|i| ((i % 13) as f64 - 6.0) / 10.0).collect();
    let artifact = ModelArtifact::new(
        vec!["FAKE".to_string(), "REAL".to_string()],
        vocabulary,
        idf,
        vec![row],
        vec![0.05],
    );
    let (vectorizer, classifier) = artifact.into_parts().expect("synthetic model is consistent");
    Pipeline::new(vectorizer, classifier).expect("dimensions agree")
}

fn document(words: usize) -> String {
    (0..words)
        .map(|i| format!("kata{}", (i * 7919) % (VOCAB_SIZE * 2)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn inference_benchmark(c: &mut Criterion) {
    let pipeline = synthetic_pipeline();

    let mut group = c.benchmark_group("infer");
    for words in [50, 500, 5_000] {
        let doc = document(words);
        group.bench_with_input(BenchmarkId::from_parameter(words), &doc, |b, doc| {
            b.iter(|| pipeline.infer(black_box(doc)));
        });
    }
    group.finish();

    let docs: Vec<String> = (0..256).map(|_| document(500)).collect();
    c.bench_function("infer_batch_256x500", |b| {
        b.iter(|| pipeline.infer_batch(black_box(&docs)));
    });
}

criterion_group!(benches, inference_benchmark);
criterion_main!(benches);
