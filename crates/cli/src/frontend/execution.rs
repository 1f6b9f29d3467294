//! Turns parsed arguments into engine runs and output lines.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine::{Digests, Engine};
use walk::FileCollector;

use super::arguments::ParsedArgs;
use super::arguments::parsed_args::STDIN_OPERAND;
use super::{ExitStatus, PROGRAM_NAME, quick};

/// Output sinks plus the `-e` value every digest is checked against.
struct Report<'a, Out, Err> {
    stdout: &'a mut Out,
    stderr: &'a mut Err,
    expected: Option<Vec<u8>>,
    mismatched: bool,
}

impl<Out: Write, Err: Write> Report<'_, Out, Err> {
    fn digests(&mut self, label: &Path, digests: &Digests, algorithms: &[&'static str]) -> io::Result<()> {
        for algorithm in algorithms {
            let Some(digest) = digests.get(*algorithm) else {
                continue;
            };
            writeln!(self.stdout, "{}  {}  {}", hex::encode(digest), algorithm, label.display())?;
            if self.expected.as_ref().is_some_and(|expected| expected != digest) {
                writeln!(
                    self.stderr,
                    "{PROGRAM_NAME}: {}: {algorithm} digest does not match the expected value",
                    label.display()
                )?;
                self.mismatched = true;
            }
        }
        Ok(())
    }

    fn error(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.stderr, "{PROGRAM_NAME}: {message}")
    }

    /// Folds digest mismatches into a status that was otherwise `status`.
    fn finish(&self, status: ExitStatus) -> ExitStatus {
        if self.mismatched {
            status.max(ExitStatus::Mismatch)
        } else {
            status
        }
    }
}

pub(crate) fn execute<Out, Err>(args: &ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> ExitStatus
where
    Out: Write,
    Err: Write,
{
    // a second run in the same process keeps the first subscriber
    let _ = logging::init_tracing(args.verbosity());

    let engine = Engine::new(args.engine_config());
    let outcome = if args.list {
        list_algorithms(&engine, stdout).map(|()| ExitStatus::Success)
    } else {
        hash(args, &engine, stdout, stderr)
    };

    outcome.unwrap_or_else(|error| {
        let _ = writeln!(stderr, "{PROGRAM_NAME}: failed to write output: {error}");
        ExitStatus::Fatal
    })
}

fn hash<Out, Err>(
    args: &ParsedArgs,
    engine: &Engine,
    stdout: &mut Out,
    stderr: &mut Err,
) -> io::Result<ExitStatus>
where
    Out: Write,
    Err: Write,
{
    let algorithms = match engine.registry().parse_selection(&args.algorithms) {
        Ok(algorithms) => algorithms,
        Err(error) => {
            writeln!(stderr, "{PROGRAM_NAME}: {error}")?;
            return Ok(ExitStatus::Usage);
        }
    };

    let expected = match args.expect.as_deref().map(|value| hex::decode(value.trim())) {
        None => None,
        Some(Ok(bytes)) => Some(bytes),
        Some(Err(error)) => {
            writeln!(stderr, "{PROGRAM_NAME}: invalid expected value: {error}")?;
            return Ok(ExitStatus::Usage);
        }
    };
    let mut report = Report {
        stdout,
        stderr,
        expected,
        mismatched: false,
    };

    if let Some(sequence) = &args.quick {
        return hash_quick(engine, sequence, &algorithms, &mut report);
    }

    if args.paths.is_empty() {
        report.error("no input paths given")?;
        return Ok(ExitStatus::Usage);
    }

    if args.reads_stdin() {
        if args.paths.len() > 1 {
            report.error(format_args!(
                "'{STDIN_OPERAND}' cannot be combined with other paths"
            ))?;
            return Ok(ExitStatus::Usage);
        }
        return hash_stdin(engine, &algorithms, &mut report);
    }

    hash_paths(args, engine, &algorithms, &mut report)
}

fn hash_quick<Out, Err>(
    engine: &Engine,
    sequence: &str,
    algorithms: &[&'static str],
    report: &mut Report<'_, Out, Err>,
) -> io::Result<ExitStatus>
where
    Out: Write,
    Err: Write,
{
    let bytes = match quick::decode(sequence) {
        Ok(bytes) => bytes,
        Err(error) => {
            report.error(error)?;
            return Ok(ExitStatus::Usage);
        }
    };
    match engine.run_bytes(&bytes, algorithms) {
        Ok(digests) => {
            report.digests(Path::new(sequence), &digests, algorithms)?;
            Ok(report.finish(ExitStatus::Success))
        }
        Err(error) => {
            report.error(&error)?;
            Ok(ExitStatus::from_engine_error(&error))
        }
    }
}

fn hash_stdin<Out, Err>(
    engine: &Engine,
    algorithms: &[&'static str],
    report: &mut Report<'_, Out, Err>,
) -> io::Result<ExitStatus>
where
    Out: Write,
    Err: Write,
{
    match engine.run_fan_out(io::stdin(), algorithms) {
        Ok(digests) => {
            report.digests(Path::new(STDIN_OPERAND), &digests, algorithms)?;
            Ok(report.finish(ExitStatus::Success))
        }
        Err(error) => {
            report.error(&error)?;
            Ok(ExitStatus::from_engine_error(&error))
        }
    }
}

fn hash_paths<Out, Err>(
    args: &ParsedArgs,
    engine: &Engine,
    algorithms: &[&'static str],
    report: &mut Report<'_, Out, Err>,
) -> io::Result<ExitStatus>
where
    Out: Write,
    Err: Write,
{
    let collector = FileCollector::new()
        .recursive(args.recursive)
        .follow_symlinks(args.follow_symlinks);

    let mut status = ExitStatus::Success;
    let mut files: Vec<PathBuf> = Vec::new();
    for root in &args.paths {
        match collector.collect_root(root) {
            Ok(found) => files.extend(found),
            Err(error) => {
                report.error(&error)?;
                status = ExitStatus::Partial;
            }
        }
    }
    if files.is_empty() {
        return Ok(status);
    }

    let digests = match engine.run_files(&files, algorithms) {
        Ok(digests) => digests,
        Err(error) => {
            report.error(&error)?;
            return Ok(status.max(ExitStatus::from_engine_error(&error)));
        }
    };

    let mut printed: HashSet<&Path> = HashSet::with_capacity(files.len());
    for path in &files {
        if !printed.insert(path.as_path()) {
            continue;
        }
        if let Some(file_digests) = digests.file(path) {
            report.digests(path, file_digests, algorithms)?;
        }
    }
    for failure in digests.failures() {
        report.error(failure)?;
    }
    if !digests.is_complete() {
        status = status.max(ExitStatus::Partial);
    }
    Ok(report.finish(status))
}

fn list_algorithms<Out: Write>(engine: &Engine, stdout: &mut Out) -> io::Result<()> {
    for name in engine.registry().names() {
        writeln!(stdout, "{name:<10} {}", engine.weights().weight(name))?;
    }
    Ok(())
}
