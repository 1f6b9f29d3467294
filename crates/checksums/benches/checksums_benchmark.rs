//! crates/checksums/benches/checksums_benchmark.rs
//!
//! Throughput of every registered algorithm over an 8 KiB block, the unit
//! the engine streams. The relative timings are what the engine's weight
//! table is calibrated against.
//!
//! Run with: `cargo bench -p checksums`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use checksums::AlgorithmRegistry;

const BLOCK: usize = 8192;

fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

fn bench_block_update(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();
    let data = generate_random_data(BLOCK);
    let mut group = c.benchmark_group("block_update");
    group.throughput(Throughput::Bytes(BLOCK as u64));

    for name in registry.names() {
        let mut checksum = registry.instantiate(name).expect("builtin algorithm");
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                checksum.update(black_box(data));
            });
        });
        black_box(checksum.finalize());
    }

    group.finish();
}

fn bench_one_shot(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();
    let mut group = c.benchmark_group("one_shot");

    for size in [64, 4096, 1 << 20] {
        let data = generate_random_data(size);
        group.throughput(Throughput::Bytes(size as u64));
        for name in ["crc32", "md5", "sha256", "blake3", "xxh3"] {
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| {
                    let mut checksum = registry.instantiate(name).expect("builtin algorithm");
                    checksum.update(black_box(data));
                    black_box(checksum.finalize())
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_block_update, bench_one_shot);
criterion_main!(benches);
