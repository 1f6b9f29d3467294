#![deny(unsafe_code)]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;

/// High-performance memory allocator; chunk buffers churn on every reader.
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    // unlocked: pipeline threads log to stderr while the run is in progress
    let mut stderr = io::stderr();
    let status = cli::run(env::args_os(), &mut stdout, &mut stderr);
    cli::exit_code_from(status)
}
