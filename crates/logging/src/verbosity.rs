//! crates/logging/src/verbosity.rs
//! Mapping from `-v` counts to tracing filter directives.

use std::fmt;

use tracing::level_filters::LevelFilter;

/// How much the hashfan subsystems report.
///
/// Third-party crates always stay at `warn`; only `hashfan::*` targets are
/// raised by additional `-v` flags.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Verbosity {
    /// Warnings and errors only (no `-v`).
    #[default]
    Warn,
    /// Per-run summaries (`-v`).
    Info,
    /// Per-file and per-worker events (`-vv`).
    Debug,
    /// Per-block events (`-vvv` and above).
    Trace,
}

impl Verbosity {
    /// Maps the number of `-v` flags to a verbosity.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        match level {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Maximum level enabled for hashfan targets.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// `EnvFilter` directive string equivalent to this verbosity.
    #[must_use]
    pub const fn directives(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "warn,hashfan=info",
            Self::Debug => "warn,hashfan=debug",
            Self::Trace => "warn,hashfan=trace",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}
