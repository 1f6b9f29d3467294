#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod subscriber;
mod tracing_macros;
mod verbosity;

pub use subscriber::{ENV_FILTER_VAR, env_filter, init_tracing};
pub use verbosity::Verbosity;

#[doc(hidden)]
pub use tracing as __tracing;

/// Event targets used by the subsystem macros.
pub mod targets {
    /// Source reading (file opens, block reads, terminal delivery).
    pub const READ: &str = "hashfan::read";
    /// Digest workers and per-pair tasks.
    pub const HASH: &str = "hashfan::hash";
    /// Algorithm to worker assignment.
    pub const SCHED: &str = "hashfan::sched";
    /// File discovery.
    pub const WALK: &str = "hashfan::walk";
}
