//! crates/logging/src/tracing_macros.rs
//! Subsystem trace macros.
//!
//! Each macro forwards to the matching `tracing` macro with a fixed
//! `hashfan::*` target so filters can address one subsystem at a time
//! (`HASHFAN_LOG=hashfan::sched=debug`). Callers do not need their own
//! `tracing` dependency.

/// Emit a source-reading trace (file opens, block reads, terminals).
///
/// # Example
/// ```ignore
/// trace_read!(path = %path.display(), "opened source");
/// ```
#[macro_export]
macro_rules! trace_read {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!(target: "hashfan::read", $($arg)*)
    };
}

/// Emit a digest worker or task trace.
///
/// # Example
/// ```ignore
/// trace_hash!(algorithm, "finalized");
/// ```
#[macro_export]
macro_rules! trace_hash {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!(target: "hashfan::hash", $($arg)*)
    };
}

/// Emit a scheduling trace.
///
/// # Example
/// ```ignore
/// trace_sched!(workers = 4, "assigned algorithms");
/// ```
#[macro_export]
macro_rules! trace_sched {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "hashfan::sched", $($arg)*)
    };
}

/// Emit a file discovery trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory {:?}", dir);
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!(target: "hashfan::walk", $($arg)*)
    };
}
