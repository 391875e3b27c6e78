//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seqforge::genomics::count_kmers;
use seqforge::*;

fn synthetic(len: usize, seed: u64) -> Sequence {
    let mut state = seed;
    let text: String = (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            b"ACGT"[(state >> 62) as usize] as char
        })
        .collect();
    Sequence::dna(&text).expect("generated bases are valid")
}

fn benchmark_alignment(c: &mut Criterion) {
    let scoring = ScoringMatrix::default();
    let mut group = c.benchmark_group("alignment");

    for len in [64usize, 256, 1024] {
        let a = synthetic(len, 1);
        let b = synthetic(len, 2);

        group.bench_with_input(BenchmarkId::new("smith_waterman", len), &len, |bench, _| {
            bench.iter(|| smith_waterman(black_box(&a), black_box(&b), &scoring));
        });
        group.bench_with_input(BenchmarkId::new("needleman_wunsch", len), &len, |bench, _| {
            bench.iter(|| needleman_wunsch(black_box(&a), black_box(&b), &scoring));
        });
        group.bench_with_input(BenchmarkId::new("score_only", len), &len, |bench, _| {
            bench.iter(|| alignment_score_only(black_box(&a), black_box(&b), &scoring));
        });
    }

    group.finish();
}

fn benchmark_kmers(c: &mut Criterion) {
    let seq = synthetic(100_000, 7);
    c.bench_function("count_kmers_k=11", |b| {
        b.iter(|| count_kmers(black_box(&seq), 11));
    });
}

criterion_group!(benches, benchmark_alignment, benchmark_kmers);
criterion_main!(benches);
