//! crates/engine/src/files.rs
//!
//! Multi-source pipeline: a pool of readers, one task per (file, algorithm).
//!
//! Readers pull file indices from a shared work queue. For each file the
//! reader opens it, starts one task per algorithm (each with its own bounded
//! queue), broadcasts the file's blocks, and joins those tasks before taking
//! the next file. At most `readers` files are open and at most
//! `readers × (1 + algorithms)` pipeline threads are alive at once.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, Scope};
use std::time::Duration;

use crossbeam_channel::{Receiver, bounded, unbounded};
use logging::{trace_hash, trace_read, trace_sched};

use crate::chunk::{Broadcast, Chunk, Stalled, StreamEnd, drain, pump};
use crate::config::EngineConfig;
use crate::engine::Resolved;
use crate::error::{EngineError, EngineResult, ThreadRole};
use crate::results::{FileDigests, FileFailure, ResultMap, SourceId, SourceKey};

/// State shared by every reader and task of one run.
struct Context<'a> {
    files: &'a [PathBuf],
    algorithms: &'a [Resolved],
    results: ResultMap,
    abort: AtomicBool,
    chunk_size: usize,
    pair_capacity: usize,
    timeout: Duration,
}

/// What one reader observed over all the files it handled.
#[derive(Default)]
struct ReaderReport {
    failures: Vec<FileFailure>,
    fatal: Vec<EngineError>,
}

/// Hashes every path in `files` (already free of duplicates) with every
/// algorithm in `algorithms`.
pub(crate) fn run(
    config: &EngineConfig,
    files: &[PathBuf],
    algorithms: &[Resolved],
) -> EngineResult<FileDigests> {
    let readers = config.reader_count(files.len());
    let ctx = Context {
        files,
        algorithms,
        results: ResultMap::new(),
        abort: AtomicBool::new(false),
        chunk_size: config.chunk_size(),
        pair_capacity: config.pair_queue_capacity(readers),
        timeout: config.dequeue_timeout(),
    };
    trace_sched!(
        files = files.len(),
        readers,
        algorithms = algorithms.len(),
        queue_capacity = ctx.pair_capacity,
        "starting per-file pipeline"
    );

    let (work_tx, work_rx) = unbounded();
    for index in 0..files.len() {
        // the receiver is alive until the end of this function
        let _ = work_tx.send(index);
    }
    drop(work_tx);

    let reports = thread::scope(|scope| -> EngineResult<Vec<ReaderReport>> {
        let ctx = &ctx;
        let mut handles = Vec::with_capacity(readers);
        for index in 0..readers {
            let work = work_rx.clone();
            let spawned = thread::Builder::new()
                .name(format!("hashfan-reader-{index}"))
                .spawn_scoped(scope, move || read_files(scope, &work, ctx));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(error) => {
                    ctx.abort.store(true, Ordering::Relaxed);
                    return Err(EngineError::Spawn {
                        role: ThreadRole::Reader,
                        error,
                    });
                }
            }
        }

        Ok(handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| ReaderReport {
                    failures: Vec::new(),
                    fatal: vec![EngineError::WorkerPanicked {
                        role: ThreadRole::Reader,
                    }],
                })
            })
            .collect())
    })?;

    let mut failures = Vec::new();
    let mut fatal = Vec::new();
    for report in reports {
        failures.extend(report.failures);
        fatal.extend(report.fatal);
    }
    if let Some(error) = most_severe(fatal) {
        return Err(error);
    }

    for path in files {
        if failures.iter().any(|failure| failure.path() == path) {
            continue;
        }
        let source_id = SourceId::Path(path.clone());
        for algorithm in algorithms {
            let key = SourceKey::new(source_id.clone(), algorithm.name);
            if !ctx.results.contains(&key) {
                return Err(EngineError::MissingResult {
                    source_id,
                    algorithm: algorithm.name,
                });
            }
        }
    }

    Ok(FileDigests::new(ctx.results.into_file_map(), failures))
}

/// Reader body: takes files until the queue is empty or the run aborts.
fn read_files<'scope>(
    scope: &'scope Scope<'scope, '_>,
    work: &Receiver<usize>,
    ctx: &'scope Context<'scope>,
) -> ReaderReport {
    let mut report = ReaderReport::default();
    while !ctx.abort.load(Ordering::Relaxed) {
        let Ok(index) = work.recv() else {
            break;
        };
        hash_file(scope, ctx, &ctx.files[index], &mut report);
        if !report.fatal.is_empty() {
            ctx.abort.store(true, Ordering::Relaxed);
        }
    }
    report
}

/// Hashes one file with every algorithm and joins its tasks.
fn hash_file<'scope>(
    scope: &'scope Scope<'scope, '_>,
    ctx: &'scope Context<'scope>,
    path: &'scope Path,
    report: &mut ReaderReport,
) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            trace_read!(path = %path.display(), %error, "open failed");
            report.failures.push(FileFailure::new(path.to_path_buf(), error));
            return;
        }
    };
    trace_read!(path = %path.display(), "opened");

    let mut senders = Vec::with_capacity(ctx.algorithms.len());
    let mut tasks = Vec::with_capacity(ctx.algorithms.len());
    for algorithm in ctx.algorithms {
        let (tx, rx) = bounded(ctx.pair_capacity);
        let spawned = thread::Builder::new()
            .name(format!("hashfan-{}", algorithm.name))
            .spawn_scoped(scope, move || hash_pair(&rx, algorithm, path, ctx));
        match spawned {
            Ok(handle) => {
                senders.push(tx);
                tasks.push((algorithm.name, handle));
            }
            Err(error) => {
                report.fatal.push(EngineError::Spawn {
                    role: ThreadRole::Task,
                    error,
                });
                break;
            }
        }
    }

    let source_id = SourceId::Path(path.to_path_buf());
    // a failed spawn leaves the started tasks without data: abort them
    let pumped = if report.fatal.is_empty() {
        Some(pump(file, ctx.chunk_size, Broadcast::new(senders), &source_id))
    } else {
        Broadcast::new(senders).finish(StreamEnd::Aborted);
        None
    };

    for (algorithm, task) in tasks {
        match task.join() {
            Ok(Ok(())) => {}
            Ok(Err(stalled)) => report.fatal.push(EngineError::Stalled {
                source_id: source_id.clone(),
                algorithm: algorithm.to_owned(),
                waited: stalled.waited,
            }),
            Err(_) => report.fatal.push(EngineError::WorkerPanicked {
                role: ThreadRole::Task,
            }),
        }
    }

    if let Some(Err(error)) = pumped {
        report.failures.push(FileFailure::new(path.to_path_buf(), error));
    }
}

/// Task body: drives a single digest over a single file.
fn hash_pair(
    queue: &Receiver<Chunk>,
    algorithm: &Resolved,
    path: &Path,
    ctx: &Context<'_>,
) -> Result<(), Stalled> {
    let mut digest = (algorithm.constructor)();
    let end = drain(queue, ctx.timeout, |block| digest.update(block))?;
    if end == StreamEnd::Complete {
        let key = SourceKey::new(SourceId::Path(path.to_path_buf()), algorithm.name);
        if !ctx.results.insert(key, digest.finalize()) {
            trace_hash!(algorithm = algorithm.name, "duplicate result ignored");
        }
    }
    Ok(())
}

/// Picks the error to report when several threads failed: panics first,
/// then stalls, then anything else in the order observed.
fn most_severe(errors: Vec<EngineError>) -> Option<EngineError> {
    let rank = |error: &EngineError| match error {
        EngineError::WorkerPanicked { .. } => 0,
        EngineError::Stalled { .. } => 1,
        _ => 2,
    };
    errors.into_iter().min_by_key(|error| rank(error))
}
