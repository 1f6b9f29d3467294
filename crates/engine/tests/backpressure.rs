//! The reader never runs further ahead of a blocked worker than its queue allows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use checksums::{AlgorithmRegistry, Checksum};
use engine::{Engine, EngineConfig};
use test_support::{CountingReader, patterned_bytes};

const CHUNK: usize = 16;
const CAPACITY: usize = 4;

static GATE_OPEN: AtomicBool = AtomicBool::new(false);

/// Checksum whose `update` waits until [`GATE_OPEN`] is set.
struct Gated {
    seen: u64,
}

impl Checksum for Gated {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn digest_len(&self) -> usize {
        8
    }

    fn reset(&mut self) {
        self.seen = 0;
    }

    fn update(&mut self, data: &[u8]) {
        while !GATE_OPEN.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(1));
        }
        self.seen += data.len() as u64;
    }

    fn finalize(&mut self) -> Vec<u8> {
        let seen = self.seen;
        self.reset();
        seen.to_be_bytes().to_vec()
    }
}

#[test]
fn blocked_worker_bounds_how_far_the_reader_gets() {
    let mut registry = AlgorithmRegistry::builtin();
    registry.register("gated", || Box::new(Gated { seen: 0 }));
    let engine = Engine::new(
        EngineConfig::default()
            .with_chunk_size(CHUNK)
            .with_queue_capacity(CAPACITY)
            .with_worker_count(1)
            .with_dequeue_timeout(Duration::from_secs(30)),
    )
    .with_registry(registry);

    let len = 4_096;
    let source = CountingReader::new(patterned_bytes(len));
    let stats = source.stats();

    thread::scope(|scope| {
        let run = scope.spawn(|| engine.run_fan_out(source, &["gated"]));

        thread::sleep(Duration::from_millis(300));
        let read_while_blocked = stats.bytes();
        GATE_OPEN.store(true, Ordering::SeqCst);
        let digests = run
            .join()
            .expect("run thread")
            .expect("fan-out completes once the worker resumes");

        // queued chunks, plus the one the worker holds and the one the reader holds
        assert!(
            read_while_blocked <= (CAPACITY + 2) * CHUNK,
            "reader ran ahead: {read_while_blocked} bytes"
        );
        assert_eq!(digests["gated"], (len as u64).to_be_bytes().to_vec());
    });

    assert_eq!(stats.bytes(), len);
    assert_eq!(stats.eof_reads(), 1);
}
