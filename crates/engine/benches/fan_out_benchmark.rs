//! Benchmark comparing the three pipelines on the same payload.

use std::fs;
use std::path::PathBuf;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

use engine::{Engine, EngineConfig};
use test_support::patterned_bytes;

const FILE_SIZE: usize = 4 * 1024 * 1024; // 4 MB per file

const SELECTIONS: [(&str, &[&str]); 3] = [
    ("fast", &["crc32", "adler32", "xxh64"]),
    ("mixed", &["crc32", "md5", "sha1", "sha256", "blake3"]),
    ("heavy", &["sha256", "sha512", "sha3-256", "sha3-512"]),
];

fn create_test_files(count: usize) -> (tempfile::TempDir, Vec<PathBuf>) {
    let dir = tempdir().unwrap();
    let paths = (0..count)
        .map(|i| {
            let path = dir.path().join(format!("file_{i}.bin"));
            fs::write(&path, patterned_bytes(FILE_SIZE)).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

fn single_source_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_source");
    let data = patterned_bytes(FILE_SIZE);
    let engine = Engine::new(EngineConfig::default());
    group.throughput(Throughput::Bytes(FILE_SIZE as u64));

    for (label, algorithms) in SELECTIONS {
        group.bench_with_input(BenchmarkId::new("fan_out", label), &data, |b, data| {
            b.iter(|| black_box(engine.run_fan_out(&data[..], algorithms).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("in_memory", label), &data, |b, data| {
            b.iter(|| black_box(engine.run_bytes(data, algorithms).unwrap()));
        });
    }

    group.finish();
}

fn multi_source_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_source");
    let engine = Engine::new(EngineConfig::default());
    let (_, algorithms) = SELECTIONS[1];

    for file_count in [4, 16] {
        let (dir, paths) = create_test_files(file_count);
        group.throughput(Throughput::Bytes((file_count * FILE_SIZE) as u64));

        group.bench_with_input(BenchmarkId::new("per_file", file_count), &paths, |b, paths| {
            b.iter(|| black_box(engine.run_files(paths, algorithms).unwrap()));
        });

        drop(dir);
    }

    group.finish();
}

criterion_group!(benches, single_source_benchmarks, multi_source_benchmarks);
criterion_main!(benches);
