//! Benchmarks for rapid_wordgraph

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rapid_wordgraph::graph::builder::build_graph_parallel;
use rapid_wordgraph::*;

/// Sample text for benchmarking
const SAMPLE_TEXT: &str = r#"
Machine learning is a subset of artificial intelligence (AI) that provides systems
the ability to automatically learn and improve from experience without being explicitly
programmed. Machine learning focuses on the development of computer programs that can
access data and use it to learn for themselves.

The process of learning begins with observations or data, such as examples, direct
experience, or instruction, in order to look for patterns in data and make better
decisions in the future based on the examples that we provide. The primary aim is to
allow the computers to learn automatically without human intervention or assistance
and adjust actions accordingly.

Deep learning is a subset of machine learning that uses artificial neural networks
with representation learning. The learning can be supervised, semi-supervised or
unsupervised. Deep learning has been applied to various fields including computer
vision, speech recognition, natural language processing, and drug design.
"#;

fn benchmark_tokenization(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();

    c.bench_function("tokenize_sample", |b| {
        b.iter(|| tokenizer.words(black_box(SAMPLE_TEXT)))
    });

    let mut group = c.benchmark_group("tokenize_by_size");
    for size in [1, 5, 10, 20].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| tokenizer.words(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_graph_building(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();
    let words = tokenizer.words(SAMPLE_TEXT);

    c.bench_function("graph_build", |b| {
        b.iter(|| GraphBuilder::from_words(black_box(&words)))
    });

    // Benchmark parallel vs sequential
    let large_words = tokenizer.words(&SAMPLE_TEXT.repeat(50));

    let mut group = c.benchmark_group("graph_build_parallel");
    group.bench_function("sequential", |b| {
        b.iter(|| GraphBuilder::from_words(black_box(&large_words)))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| build_graph_parallel(black_box(&large_words)))
    });
    group.finish();
}

fn benchmark_queries(c: &mut Criterion) {
    let graph = WordGraph::from_text(&SAMPLE_TEXT.repeat(5));

    c.bench_function("bridge_words", |b| {
        b.iter(|| find_bridge_words(black_box(&graph), "machine", "is"))
    });

    let (from, to) = ("machine", "design");
    c.bench_function("all_shortest_paths", |b| {
        b.iter(|| all_shortest_paths(black_box(&graph), from, to))
    });

    let augmenter = TextAugmenter::new(&graph);
    let text = "machine is subset of intelligence";
    c.bench_function("generate_new_text", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| augmenter.generate(black_box(text), &mut rng))
    });

    let walker = RandomWalker::new(&graph);
    c.bench_function("random_walk", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| walker.walk(&mut rng))
    });
}

criterion_group!(
    benches,
    benchmark_tokenization,
    benchmark_graph_building,
    benchmark_queries
);
criterion_main!(benches);
