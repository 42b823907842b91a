//! Benchmarks for the re-chunking hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId, Throughput};
use rust_restreamer::rebuffer::PartBuffer;

const PART_SIZE: usize = 5 * 1024 * 1024;
const TOTAL_BYTES: usize = 32 * 1024 * 1024;

/// Benchmark re-chunking with different input chunk sizes
fn bench_rebuffer_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuffer_chunk_sizes");

    // Input chunk sizes from tiny network reads up to oversized chunks
    let chunk_sizes = vec![
        (4 * 1024, "4KB"),
        (64 * 1024, "64KB"),
        (1024 * 1024, "1MB"),
        (8 * 1024 * 1024, "8MB"),
    ];

    for (chunk_size, name) in chunk_sizes {
        let chunk = vec![0u8; chunk_size];
        let iterations = TOTAL_BYTES / chunk_size;

        group.throughput(Throughput::Bytes(TOTAL_BYTES as u64));
        group.bench_with_input(
            BenchmarkId::new("push", name),
            &chunk,
            |b, chunk| {
                b.iter(|| {
                    let mut buffer = PartBuffer::new(PART_SIZE);
                    let mut emitted = 0usize;
                    for _ in 0..iterations {
                        for part in buffer.push(black_box(chunk)) {
                            emitted += part.len();
                        }
                    }
                    if let Some(tail) = buffer.finish() {
                        emitted += tail.len();
                    }
                    emitted
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the cost of cutting different part sizes from the same input
fn bench_rebuffer_part_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuffer_part_sizes");

    let chunk = vec![0u8; 256 * 1024];
    let iterations = TOTAL_BYTES / chunk.len();

    for part_size_mb in [5usize, 10, 16] {
        let part_size = part_size_mb * 1024 * 1024;

        group.throughput(Throughput::Bytes(TOTAL_BYTES as u64));
        group.bench_function(BenchmarkId::new("part_size_mb", part_size_mb), |b| {
            b.iter(|| {
                let mut buffer = PartBuffer::new(part_size);
                let mut parts = 0usize;
                for _ in 0..iterations {
                    parts += buffer.push(black_box(&chunk)).len();
                }
                parts
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rebuffer_chunk_sizes, bench_rebuffer_part_sizes);
criterion_main!(benches);
