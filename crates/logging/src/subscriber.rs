//! crates/logging/src/subscriber.rs
//! Global subscriber installation.
//!
//! Events are formatted by the `tracing-subscriber` fmt layer and written to
//! stderr so they never interleave with digest lines on stdout.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::Verbosity;

/// Environment variable whose value replaces the verbosity-derived filter.
pub const ENV_FILTER_VAR: &str = "HASHFAN_LOG";

/// Builds the filter for `verbosity`, honouring [`ENV_FILTER_VAR`] when it is
/// set to a valid directive string.
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(ENV_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()))
}

/// Installs the global subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{Verbosity, init_tracing};
///
/// init_tracing(Verbosity::from_verbose_level(2))?;
/// logging::trace_hash!("worker started");
/// ```
///
/// # Errors
///
/// Fails when a global subscriber has already been installed.
pub fn init_tracing(verbosity: Verbosity) -> Result<(), TryInitError> {
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(verbosity >= Verbosity::Debug);

    tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(fmt)
        .try_init()
}
