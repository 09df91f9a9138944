use criterion::{criterion_group, criterion_main, Criterion};
use evalcore::corpus::CorpusDoc;
use evalcore::tokenizer::tokenize;
use evalcore::{Analyzer, FrequencyMatrix, StreamingClusterer};

const TOPICS: &[&str] = &[
    "earthquake shakes the coast of chile tonight",
    "cup final goes to extra time after late goal",
    "polls close as election night results come in",
    "wildfire spreads across the hills near the city",
];

fn synthetic_corpus(n: usize) -> Vec<CorpusDoc> {
    (0..n)
        .map(|i| CorpusDoc {
            id: format!("{i}"),
            text: format!("{} update {} #{}", TOPICS[i % TOPICS.len()], i % 17, i % 5),
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = TOPICS.join(" ");
    c.bench_function("tokenize_topics", |b| b.iter(|| tokenize(&text)));
}

fn bench_fsd(c: &mut Criterion) {
    let docs = synthetic_corpus(2_000);
    let matrix = FrequencyMatrix::from_documents(&docs, &Analyzer::default()).unwrap();
    let clusterer = StreamingClusterer::default();
    c.bench_function("fsd_2000_docs", |b| {
        b.iter(|| clusterer.cluster(matrix.order(), matrix.vectors(), matrix.vocabulary()).unwrap())
    });
}

criterion_group!(benches, bench_tokenize, bench_fsd);
criterion_main!(benches);
