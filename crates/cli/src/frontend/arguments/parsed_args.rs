use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use engine::EngineConfig;
use logging::Verbosity;

/// Path operand that selects standard input.
pub(crate) const STDIN_OPERAND: &str = "-";

/// Dequeue timeout for standard input when `--timeout` is not given. A pipe
/// may legitimately stay silent far longer than a file read.
pub(crate) const STDIN_DEQUEUE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Parsed command-line arguments.
///
/// Tuning fields are `None` when the flag was not given, so the engine
/// default applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Raw `-a` selection, `+`-separated or `all`.
    pub algorithms: String,
    /// `-r`/`--recursive`.
    pub recursive: bool,
    /// `--follow-symlinks`.
    pub follow_symlinks: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
    /// `--list`.
    pub list: bool,
    /// `-q` literal, still encoded.
    pub quick: Option<String>,
    /// `-e` expected digest in hex.
    pub expect: Option<String>,
    /// `--chunk-size`.
    pub chunk_size: Option<usize>,
    /// `--readers`.
    pub readers: Option<usize>,
    /// `--workers`.
    pub workers: Option<usize>,
    /// `--queue-capacity`.
    pub queue_capacity: Option<usize>,
    /// `--timeout`, in seconds.
    pub timeout: Option<u64>,
    /// Path operands in command-line order.
    pub paths: Vec<PathBuf>,
}

impl ParsedArgs {
    /// Log verbosity requested with `-v`.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_verbose_level(self.verbose)
    }

    /// Engine configuration with every given override applied.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(size) = self.chunk_size {
            config = config.with_chunk_size(size);
        }
        if let Some(readers) = self.readers {
            config = config.with_reader_pool_size(readers);
        }
        if let Some(workers) = self.workers {
            config = config.with_worker_count(workers);
        }
        if let Some(capacity) = self.queue_capacity {
            config = config.with_queue_capacity(capacity);
        }
        match self.timeout {
            Some(seconds) => config = config.with_dequeue_timeout(Duration::from_secs(seconds)),
            None if self.reads_stdin() => {
                config = config.with_dequeue_timeout(STDIN_DEQUEUE_TIMEOUT);
            }
            None => {}
        }
        config
    }

    /// Returns `true` when any operand is `-`.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.paths
            .iter()
            .any(|path| path.as_os_str() == OsStr::new(STDIN_OPERAND))
    }
}
