#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `hashfan`. It parses the
//! arguments with [`clap`](https://docs.rs/clap/), turns the paths into a
//! file list with [`walk::FileCollector`], and hands the work to
//! [`engine::Engine`]: standard input (`-`) goes through the single-source
//! fan-out pipeline, everything else through the per-file pipeline. A `-q`
//! literal is decoded and hashed in memory.
//!
//! # Design
//!
//! [`run`] takes the argument iterator together with handles for standard
//! output and error, so tests can drive the whole front-end in memory. Digest
//! lines go to standard output as `<hex>  <algorithm>  <path>`, one per
//! (file, algorithm) pair, in collection order and with algorithms in the
//! order they were selected. Diagnostics go to standard error.
//!
//! # Errors
//!
//! Failures are reported through the exit code (see [`ExitStatus`]):
//! `0` on success, `1` for usage and setup errors, `2` when some inputs could
//! not be read, `3` for internal failures such as a stalled pipeline, and
//! `4` when a digest differs from the `-e` value.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["hashfan", "--list"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! let listing = String::from_utf8(stdout).unwrap();
//! assert!(listing.lines().any(|line| line.starts_with("sha256")));
//! ```

mod frontend;

pub use frontend::{DEFAULT_ALGORITHM, ExitStatus, exit_code_from, run};

/// Argument parsing entry points for integration tests.
///
/// Not part of the stable API.
pub mod test_utils {
    pub use crate::frontend::arguments::{ParsedArgs, parse_args};
}
