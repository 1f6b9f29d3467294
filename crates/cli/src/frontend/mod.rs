pub(crate) mod arguments;
mod command_builder;
mod execution;
mod exit;
mod quick;


use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;

pub use exit::ExitStatus;

/// Selection used when `-a` is not given.
pub const DEFAULT_ALGORITHM: &str = "sha256";

/// Name used in diagnostics and as the default `argv[0]`.
pub(crate) const PROGRAM_NAME: &str = "hashfan";

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code. Help and version requests print to
/// `stdout` and succeed; parse errors print to `stderr` and return `1`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    match arguments::parse_args(args) {
        Ok(parsed) => execution::execute(&parsed, stdout, stderr).code(),
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = write!(stdout, "{}", error.render());
                ExitStatus::Success.code()
            }
            _ => {
                let _ = write!(stderr, "{}", error.render());
                ExitStatus::Usage.code()
            }
        },
    }
}

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
