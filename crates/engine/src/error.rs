//! Common error types for the engine crate.

use std::fmt;
use std::io;
use std::time::Duration;

use checksums::UnknownAlgorithm;
use thiserror::Error;

use crate::results::SourceId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Kind of thread an internal failure was observed on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThreadRole {
    /// A thread reading a source and broadcasting its blocks.
    Reader,
    /// A fan-out worker driving a group of digests.
    Worker,
    /// A per-(file, algorithm) task.
    Task,
}

impl fmt::Display for ThreadRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reader => "reader",
            Self::Worker => "worker",
            Self::Task => "task",
        })
    }
}

/// Errors that can occur during engine operations.
///
/// Setup errors are returned before any thread starts. Internal failures
/// are returned only after every thread of the run has been joined.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An algorithm name did not resolve.
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
    /// The algorithm list was empty.
    #[error("no checksum algorithms were requested")]
    NoAlgorithms,
    /// The file list was empty.
    #[error("no input files were given")]
    NoSources,
    /// A source could not be opened or read.
    #[error("failed to read {source_id}: {error}")]
    Io {
        /// Source that failed.
        source_id: SourceId,
        /// Underlying error.
        #[source]
        error: io::Error,
    },
    /// A consumer waited for the next block longer than the dequeue timeout.
    #[error("stalled stream: {algorithm} on {source_id} received nothing for {waited:?}")]
    Stalled {
        /// Source being hashed.
        source_id: SourceId,
        /// Algorithms owned by the stalled consumer, joined with `+`.
        algorithm: String,
        /// Configured dequeue timeout.
        waited: Duration,
    },
    /// A thread panicked.
    #[error("a {role} thread panicked")]
    WorkerPanicked {
        /// Which kind of thread.
        role: ThreadRole,
    },
    /// A consumer finished without storing its digest.
    #[error("no {algorithm} digest was produced for {source_id}")]
    MissingResult {
        /// Source being hashed.
        source_id: SourceId,
        /// Canonical algorithm name.
        algorithm: &'static str,
    },
    /// The operating system refused to start a thread.
    #[error("failed to spawn {role} thread: {error}")]
    Spawn {
        /// Which kind of thread.
        role: ThreadRole,
        /// Underlying error.
        #[source]
        error: io::Error,
    },
}

impl EngineError {
    /// Returns `true` for failures that indicate a bug or a stuck pipeline
    /// rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Stalled { .. }
                | Self::WorkerPanicked { .. }
                | Self::MissingResult { .. }
                | Self::Spawn { .. }
        )
    }

    /// Returns `true` for errors raised before any thread started.
    pub const fn is_setup(&self) -> bool {
        matches!(
            self,
            Self::UnknownAlgorithm(_) | Self::NoAlgorithms | Self::NoSources
        )
    }
}
