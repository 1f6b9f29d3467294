//! crates/engine/src/config.rs
//!
//! Tunables shared by the fan-out and per-file pipelines.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

/// Bytes per block read from a source.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Capacity of each fan-out worker queue, and upper bound for per-pair
/// queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Maximum number of concurrent file readers in the per-file pipeline.
pub const DEFAULT_READER_POOL_SIZE: usize = 4;

/// Total bytes the per-file pipeline may hold in queued chunks.
pub const DEFAULT_BUFFER_BUDGET: usize = 256 * 1024 * 1024;

/// How long a consumer waits for the next chunk before declaring the stream
/// stalled.
pub const DEFAULT_DEQUEUE_TIMEOUT: Duration = Duration::from_secs(60);

const MIN_DEQUEUE_TIMEOUT: Duration = Duration::from_millis(1);

/// Configuration for an [`Engine`](crate::Engine).
///
/// Every setter clamps zero to the smallest usable value, so a built config
/// is always valid.
///
/// # Example
///
/// ```
/// use engine::EngineConfig;
/// use std::time::Duration;
///
/// let config = EngineConfig::default()
///     .with_chunk_size(64 * 1024)
///     .with_worker_count(0)
///     .with_dequeue_timeout(Duration::from_secs(5));
/// assert_eq!(config.chunk_size(), 64 * 1024);
/// assert_eq!(config.worker_count(), 1);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    chunk_size: usize,
    queue_capacity: usize,
    reader_pool_size: usize,
    worker_count: usize,
    buffer_budget: usize,
    dequeue_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            reader_pool_size: DEFAULT_READER_POOL_SIZE,
            worker_count: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            buffer_budget: DEFAULT_BUFFER_BUDGET,
            dequeue_timeout: DEFAULT_DEQUEUE_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Sets the block size used when reading sources.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Sets the fan-out queue capacity (in chunks).
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Sets the maximum number of concurrent file readers.
    #[must_use]
    pub fn with_reader_pool_size(mut self, readers: usize) -> Self {
        self.reader_pool_size = readers.max(1);
        self
    }

    /// Sets the number of fan-out worker threads.
    #[must_use]
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers.max(1);
        self
    }

    /// Sets the byte budget for queued chunks in the per-file pipeline.
    #[must_use]
    pub fn with_buffer_budget(mut self, bytes: usize) -> Self {
        self.buffer_budget = bytes.max(1);
        self
    }

    /// Sets how long a consumer waits for the next chunk.
    #[must_use]
    pub fn with_dequeue_timeout(mut self, timeout: Duration) -> Self {
        self.dequeue_timeout = timeout.max(MIN_DEQUEUE_TIMEOUT);
        self
    }

    /// Block size used when reading sources.
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fan-out queue capacity in chunks.
    pub const fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Maximum number of concurrent file readers.
    pub const fn reader_pool_size(&self) -> usize {
        self.reader_pool_size
    }

    /// Number of fan-out worker threads before clamping to the algorithm
    /// count.
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Byte budget for queued chunks in the per-file pipeline.
    pub const fn buffer_budget(&self) -> usize {
        self.buffer_budget
    }

    /// How long a consumer waits for the next chunk.
    pub const fn dequeue_timeout(&self) -> Duration {
        self.dequeue_timeout
    }

    /// Fan-out workers used for `algorithms` algorithms.
    pub fn fan_out_workers(&self, algorithms: usize) -> usize {
        self.worker_count.min(algorithms)
    }

    /// Readers used for `files` files.
    pub fn reader_count(&self, files: usize) -> usize {
        self.reader_pool_size.min(files)
    }

    /// Per-(file, algorithm) queue capacity when `readers` readers run.
    ///
    /// The budget is split evenly between readers and expressed in chunks,
    /// then clamped to `[1, queue_capacity]`.
    pub fn pair_queue_capacity(&self, readers: usize) -> usize {
        let per_reader = self.buffer_budget / readers.max(1);
        (per_reader / self.chunk_size).clamp(1, self.queue_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.chunk_size(), 8192);
        assert_eq!(config.queue_capacity(), 1024);
        assert_eq!(config.reader_pool_size(), 4);
        assert_eq!(config.buffer_budget(), 256 * 1024 * 1024);
        assert_eq!(config.dequeue_timeout(), Duration::from_secs(60));
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn setters_clamp_zero() {
        let config = EngineConfig::default()
            .with_chunk_size(0)
            .with_queue_capacity(0)
            .with_reader_pool_size(0)
            .with_worker_count(0)
            .with_buffer_budget(0)
            .with_dequeue_timeout(Duration::ZERO);
        assert_eq!(config.chunk_size(), 1);
        assert_eq!(config.queue_capacity(), 1);
        assert_eq!(config.reader_pool_size(), 1);
        assert_eq!(config.worker_count(), 1);
        assert_eq!(config.buffer_budget(), 1);
        assert_eq!(config.dequeue_timeout(), MIN_DEQUEUE_TIMEOUT);
    }

    #[test]
    fn worker_and_reader_counts_never_exceed_work() {
        let config = EngineConfig::default()
            .with_worker_count(8)
            .with_reader_pool_size(4);
        assert_eq!(config.fan_out_workers(3), 3);
        assert_eq!(config.fan_out_workers(20), 8);
        assert_eq!(config.reader_count(2), 2);
        assert_eq!(config.reader_count(100), 4);
        assert_eq!(config.fan_out_workers(0), 0);
    }

    #[test]
    fn pair_queue_capacity_splits_budget_and_clamps() {
        let defaults = EngineConfig::default();
        // 256 MiB / 4 readers / 8 KiB = 8192 chunks, clamped to 1024
        assert_eq!(defaults.pair_queue_capacity(4), 1024);

        let small = EngineConfig::default()
            .with_buffer_budget(64 * 1024)
            .with_chunk_size(8 * 1024);
        assert_eq!(small.pair_queue_capacity(2), 4);
        assert_eq!(small.pair_queue_capacity(16), 1);
        assert_eq!(small.pair_queue_capacity(0), 8);
    }
}
