//! Benchmarks for MD5 digest computation.
//!
//! Run with: `cargo bench -p mdigest`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use mdigest::Md5;

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// Benchmark one-shot digests for block-aligned and unaligned sizes.
fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_one_shot");

    for size in [64, 512, 1024, 4096, 8192, 32768, 131072] {
        let data = generate_random_data(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("digest", size), &data, |b, data| {
            b.iter(|| black_box(Md5::digest(black_box(data))));
        });
    }

    group.finish();
}

/// Benchmark streaming updates in small chunks against one large update.
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_streaming");

    let size = 65536;
    let data = generate_random_data(size);
    group.throughput(Throughput::Bytes(size as u64));

    for chunk_len in [64, 1024, 8192] {
        group.bench_with_input(
            BenchmarkId::new("chunked", chunk_len),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut hasher = Md5::new();
                    for chunk in data.chunks(chunk_len) {
                        hasher.update(black_box(chunk));
                    }
                    black_box(hasher.finalize())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the discontiguous buffer-pair entry point against manual
/// concatenation into a scratch buffer.
fn bench_buffer_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_buffer_pair");

    let header = generate_random_data(48);
    let payload = generate_random_data(8192);
    group.throughput(Throughput::Bytes((header.len() + payload.len()) as u64));

    group.bench_function("digest_pair", |b| {
        b.iter(|| black_box(Md5::digest_pair(black_box(&header), black_box(&payload))));
    });

    group.bench_function("concatenate_then_digest", |b| {
        b.iter(|| {
            let mut joined = Vec::with_capacity(header.len() + payload.len());
            joined.extend_from_slice(&header);
            joined.extend_from_slice(&payload);
            black_box(Md5::digest(&joined))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_one_shot, bench_streaming, bench_buffer_pair);
criterion_main!(benches);
