//! Multi-source pipeline behavior.

use std::path::PathBuf;
use std::time::Duration;

use checksums::{AlgorithmRegistry, Checksum};
use engine::{Engine, EngineConfig, EngineError, ThreadRole};
use test_support::fixtures::FileTree;
use test_support::patterned_bytes;

fn engine() -> Engine {
    Engine::new(
        EngineConfig::default()
            .with_chunk_size(512)
            .with_reader_pool_size(2),
    )
}

#[test]
fn every_pair_is_hashed_once() {
    let tree = FileTree::new().expect("tree");
    let paths: Vec<PathBuf> = (0..6)
        .map(|i| {
            tree.write(format!("f{i}.bin"), patterned_bytes(i * 700))
                .expect("write")
        })
        .collect();
    let algorithms = ["md5", "sha1", "crc32"];

    let digests = engine().run_files(&paths, &algorithms).expect("run");
    assert!(digests.is_complete());
    assert_eq!(digests.file_count(), paths.len());
    assert_eq!(digests.len(), paths.len() * algorithms.len());

    let reference = engine();
    for (i, path) in paths.iter().enumerate() {
        let expected = reference
            .run_bytes(&patterned_bytes(i * 700), &algorithms)
            .expect("bytes");
        assert_eq!(digests.file(path), Some(&expected));
    }
}

#[test]
fn missing_file_is_a_failure_not_an_error() {
    let tree = FileTree::new().expect("tree");
    let present = tree.write("present.txt", b"abc").expect("write");
    let missing = tree.missing("gone.txt");

    let digests = engine()
        .run_files(&[&present, &missing], &["crc32", "md5"])
        .expect("partial success");

    assert!(!digests.is_complete());
    assert_eq!(digests.failures().len(), 1);
    assert_eq!(digests.failures()[0].path(), missing.as_path());
    assert_eq!(
        digests.failures()[0].error().kind(),
        std::io::ErrorKind::NotFound
    );
    assert_eq!(hex::encode(digests.get(&present, "crc32").expect("crc")), "352441c2");
    assert!(digests.get(&missing, "crc32").is_none());
    assert_eq!(digests.len(), 2);
}

#[test]
fn unreadable_source_after_open_is_a_failure() {
    let tree = FileTree::new().expect("tree");
    let file = tree.write("file.txt", b"hello").expect("write");
    let directory = tree.path().join("subdir");
    std::fs::create_dir(&directory).expect("mkdir");

    let digests = engine()
        .run_files(&[&file, &directory], &["sha256"])
        .expect("partial success");
    assert_eq!(digests.failures().len(), 1);
    assert_eq!(digests.failures()[0].path(), directory.as_path());
    assert!(digests.get(&file, "sha256").is_some());
}

#[test]
fn duplicate_paths_are_hashed_once() {
    let tree = FileTree::new().expect("tree");
    let path = tree.write("same.bin", patterned_bytes(2_000)).expect("write");
    let digests = engine()
        .run_files(&[&path, &path, &path], &["md5", "MD-5"])
        .expect("run");
    assert_eq!(digests.len(), 1);
    assert_eq!(digests.file_count(), 1);
}

#[test]
fn empty_file_hashes_to_empty_input_digest() {
    let tree = FileTree::new().expect("tree");
    let path = tree.write("empty", b"").expect("write");
    let digests = engine().run_files(&[&path], &["md5"]).expect("run");
    assert_eq!(
        hex::encode(digests.get(&path, "md5").expect("md5")),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}

#[test]
fn tiny_budget_uses_single_slot_queues() {
    let tree = FileTree::new().expect("tree");
    let data = patterned_bytes(5_000);
    let path = tree.write("big.bin", &data).expect("write");
    let engine = Engine::new(
        EngineConfig::default()
            .with_chunk_size(16)
            .with_buffer_budget(1),
    );
    assert_eq!(engine.config().pair_queue_capacity(1), 1);

    let algorithms = ["sha512", "adler32"];
    let digests = engine.run_files(&[&path], &algorithms).expect("run");
    let expected = engine.run_bytes(&data, &algorithms).expect("bytes");
    assert_eq!(digests.file(&path), Some(&expected));
}

#[test]
fn iteration_is_ordered_by_path_then_algorithm() {
    let tree = FileTree::new().expect("tree");
    let b = tree.write("b", b"2").expect("write");
    let a = tree.write("a", b"1").expect("write");
    let digests = engine().run_files(&[&b, &a], &["sha1", "md5"]).expect("run");

    let order: Vec<(PathBuf, &str)> = digests
        .iter()
        .map(|(path, algorithm, _)| (path.to_path_buf(), algorithm))
        .collect();
    assert_eq!(
        order,
        vec![
            (a.clone(), "md5"),
            (a, "sha1"),
            (b.clone(), "md5"),
            (b, "sha1"),
        ]
    );
}

#[test]
fn empty_file_list_is_rejected() {
    let none: [PathBuf; 0] = [];
    assert!(matches!(
        engine().run_files(&none, &["md5"]),
        Err(EngineError::NoSources)
    ));
}

#[test]
fn unknown_algorithm_is_rejected_before_reading() {
    let tree = FileTree::new().expect("tree");
    let path = tree.write("x", b"x").expect("write");
    let error = engine()
        .run_files(&[&path], &["nope"])
        .expect_err("unknown");
    assert!(matches!(error, EngineError::UnknownAlgorithm(_)));
}

struct Exploding;

impl Checksum for Exploding {
    fn name(&self) -> &'static str {
        "exploding"
    }

    fn digest_len(&self) -> usize {
        0
    }

    fn reset(&mut self) {}

    fn update(&mut self, data: &[u8]) {
        assert!(data.is_empty(), "exploding checksum received data");
    }

    fn finalize(&mut self) -> Vec<u8> {
        Vec::new()
    }
}

#[test]
fn panicking_task_fails_the_run() {
    let tree = FileTree::new().expect("tree");
    let path = tree.write("data", patterned_bytes(1_000)).expect("write");
    let mut registry = AlgorithmRegistry::builtin();
    registry.register("exploding", || Box::new(Exploding));

    let error = engine()
        .with_registry(registry)
        .run_files(&[&path], &["md5", "exploding"])
        .expect_err("task panics");
    assert!(matches!(
        error,
        EngineError::WorkerPanicked {
            role: ThreadRole::Task
        }
    ));
}

#[test]
fn config_timeout_is_respected_for_live_streams() {
    let tree = FileTree::new().expect("tree");
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| tree.write(format!("{i}"), patterned_bytes(4_096)).expect("write"))
        .collect();
    let engine = Engine::new(
        EngineConfig::default()
            .with_reader_pool_size(1)
            .with_dequeue_timeout(Duration::from_secs(5)),
    );
    let digests = engine.run_files(&paths, &["sha3-512", "crc32"]).expect("run");
    assert!(digests.is_complete());
    assert_eq!(digests.len(), 16);
}
