//! Criterion benchmarks for the chunkers.
//!
//! Complements `chunkmark-bench`: the binary times whole-corpus passes, these
//! measure each chunker on synthetic prose at a few input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chunkmark::{
    chunk, Chunker, DelimiterChunker, FixedChunker, NaiveChunker, RecursiveChunker,
    SentenceChunker,
};

const CHUNK_SIZE: usize = 4096;

fn sample_text(size: usize) -> String {
    let sentences = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump?\n",
        "The five boxing wizards jump quickly. ",
        "Sphinx of black quartz, judge my vow.\n\n",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn chunkers() -> Vec<(&'static str, Box<dyn Chunker>)> {
    vec![
        ("delimiter", Box::new(DelimiterChunker::new(CHUNK_SIZE)) as Box<dyn Chunker>),
        ("fixed", Box::new(FixedChunker::no_overlap(CHUNK_SIZE))),
        ("recursive", Box::new(RecursiveChunker::prose(CHUNK_SIZE))),
        ("sentence", Box::new(SentenceChunker::new(CHUNK_SIZE))),
        ("naive", Box::new(NaiveChunker::new(CHUNK_SIZE))),
    ]
}

fn bench_chunkers(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunkers");

    for size in [10_000, 100_000, 1_000_000] {
        let text = sample_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        for (name, chunker) in chunkers() {
            group.bench_with_input(BenchmarkId::new(name, size), &text, |b, text| {
                b.iter(|| chunker.chunk(black_box(text)))
            });
        }
    }

    group.finish();
}

fn bench_delimiter_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("delimiter_iter");
    let text = sample_text(1_000_000);
    group.throughput(Throughput::Bytes(text.len() as u64));

    // memrchr, memrchr2, memrchr3, then the lookup table
    for delimiters in [&b"\n"[..], b"\n.", b"\n.?", b"\n.?!;"] {
        let id = String::from_utf8_lossy(delimiters).escape_debug().to_string();
        group.bench_with_input(BenchmarkId::new("delimiters", id), &text, |b, text| {
            b.iter(|| {
                chunk(black_box(text.as_bytes()))
                    .size(CHUNK_SIZE)
                    .delimiters(delimiters)
                    .count()
            })
        });
    }

    group.bench_with_input(BenchmarkId::new("pattern", ". "), &text, |b, text| {
        b.iter(|| {
            chunk(black_box(text.as_bytes()))
                .size(CHUNK_SIZE)
                .pattern(b". ")
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_chunkers, bench_delimiter_iter);
criterion_main!(benches);
