//! crates/engine/src/fanout.rs
//!
//! Single-source pipeline: one reader broadcasts to a fixed worker pool.
//!
//! Each worker owns a bounded queue and a group of digests chosen by the
//! LPT scheduler. The reader hands every block to every queue, so the
//! source is read once however many algorithms consume it, and the slowest
//! worker throttles the reader once its queue is full.

use std::io::Read;
use std::thread;
use std::time::Duration;

use checksums::Checksum;
use crossbeam_channel::{Receiver, bounded};
use logging::{trace_hash, trace_sched};

use crate::chunk::{Broadcast, Chunk, Stalled, StreamEnd, drain, pump};
use crate::config::EngineConfig;
use crate::engine::Resolved;
use crate::error::{EngineError, EngineResult, ThreadRole};
use crate::results::{Digests, ResultMap, SourceId, SourceKey};

/// Hashes `source` with every algorithm in `algorithms`, split into
/// `groups` (indices into `algorithms`, one group per worker).
pub(crate) fn run<R: Read + Send>(
    config: &EngineConfig,
    source: R,
    source_id: &SourceId,
    algorithms: &[Resolved],
    groups: &[Vec<usize>],
) -> EngineResult<Digests> {
    let results = ResultMap::new();
    let timeout = config.dequeue_timeout();
    trace_sched!(
        source = %source_id,
        workers = groups.len(),
        algorithms = algorithms.len(),
        "starting fan-out"
    );

    let outcome = thread::scope(|scope| -> EngineResult<Outcome> {
        let mut senders = Vec::with_capacity(groups.len());
        let mut workers = Vec::with_capacity(groups.len());
        for (index, group) in groups.iter().enumerate() {
            let (tx, rx) = bounded(config.queue_capacity());
            senders.push(tx);
            let owned: Vec<&Resolved> = group.iter().map(|&i| &algorithms[i]).collect();
            let results = &results;
            let handle = thread::Builder::new()
                .name(format!("hashfan-worker-{index}"))
                .spawn_scoped(scope, move || {
                    hash_group(&rx, &owned, timeout, source_id, results).map_err(|stalled| {
                        (joined_names(&owned), stalled)
                    })
                })
                .map_err(|error| EngineError::Spawn {
                    role: ThreadRole::Worker,
                    error,
                })?;
            workers.push(handle);
        }

        let broadcast = Broadcast::new(senders);
        let chunk_size = config.chunk_size();
        let reader = thread::Builder::new()
            .name("hashfan-reader".to_owned())
            .spawn_scoped(scope, move || pump(source, chunk_size, broadcast, source_id))
            .map_err(|error| EngineError::Spawn {
                role: ThreadRole::Reader,
                error,
            })?;

        let mut outcome = Outcome::default();
        match reader.join() {
            Ok(Ok(_)) => {}
            Ok(Err(error)) => outcome.io = Some(error),
            Err(_) => outcome.panicked = Some(ThreadRole::Reader),
        }
        for worker in workers {
            match worker.join() {
                Ok(Ok(())) => {}
                Ok(Err(stall)) => {
                    outcome.stalled.get_or_insert(stall);
                }
                Err(_) => {
                    outcome.panicked.get_or_insert(ThreadRole::Worker);
                }
            }
        }
        Ok(outcome)
    })?;

    if let Some(role) = outcome.panicked {
        return Err(EngineError::WorkerPanicked { role });
    }
    if let Some((algorithm, stalled)) = outcome.stalled {
        return Err(EngineError::Stalled {
            source_id: source_id.clone(),
            algorithm,
            waited: stalled.waited,
        });
    }
    if let Some(error) = outcome.io {
        return Err(EngineError::Io {
            source_id: source_id.clone(),
            error,
        });
    }
    for algorithm in algorithms {
        if !results.contains(&SourceKey::new(source_id.clone(), algorithm.name)) {
            return Err(EngineError::MissingResult {
                source_id: source_id.clone(),
                algorithm: algorithm.name,
            });
        }
    }
    Ok(results.into_digests())
}

/// Everything that went wrong on the threads of one run.
#[derive(Default)]
struct Outcome {
    panicked: Option<ThreadRole>,
    stalled: Option<(String, Stalled)>,
    io: Option<std::io::Error>,
}

/// Worker body: feeds every block to each owned digest in group order.
fn hash_group(
    queue: &Receiver<Chunk>,
    owned: &[&Resolved],
    timeout: Duration,
    source_id: &SourceId,
    results: &ResultMap,
) -> Result<(), Stalled> {
    let mut digests: Vec<Box<dyn Checksum>> =
        owned.iter().map(|algorithm| (algorithm.constructor)()).collect();
    let end = drain(queue, timeout, |block| {
        for digest in &mut digests {
            digest.update(block);
        }
    })?;

    if end == StreamEnd::Complete {
        for (algorithm, digest) in owned.iter().zip(&mut digests) {
            let key = SourceKey::new(source_id.clone(), algorithm.name);
            if !results.insert(key, digest.finalize()) {
                trace_hash!(algorithm = algorithm.name, "duplicate result ignored");
            }
        }
        trace_hash!(algorithms = %joined_names(owned), "worker finalized");
    }
    Ok(())
}

fn joined_names(owned: &[&Resolved]) -> String {
    owned
        .iter()
        .map(|algorithm| algorithm.name)
        .collect::<Vec<_>>()
        .join("+")
}
