use std::ffi::OsString;
use std::path::PathBuf;

use super::ParsedArgs;
use crate::frontend::PROGRAM_NAME;
use crate::frontend::command_builder::clap_command;

/// Parses `arguments` (including `argv[0]`).
///
/// # Errors
///
/// Returns the [`clap::Error`] for invalid arguments and for help and
/// version requests, which clap reports as errors of their own kind.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = clap_command(PROGRAM_NAME).try_get_matches_from(arguments)?;

    Ok(ParsedArgs {
        algorithms: matches
            .get_one::<String>("algorithm")
            .cloned()
            .unwrap_or_default(),
        recursive: matches.get_flag("recursive"),
        follow_symlinks: matches.get_flag("follow-symlinks"),
        verbose: matches.get_count("verbose"),
        list: matches.get_flag("list"),
        quick: matches.get_one::<String>("quick").cloned(),
        expect: matches.get_one::<String>("expect").cloned(),
        chunk_size: matches.get_one::<usize>("chunk-size").copied(),
        readers: matches.get_one::<usize>("readers").copied(),
        workers: matches.get_one::<usize>("workers").copied(),
        queue_capacity: matches.get_one::<usize>("queue-capacity").copied(),
        timeout: matches.get_one::<u64>("timeout").copied(),
        paths: matches
            .get_many::<OsString>("paths")
            .map(|values| values.map(PathBuf::from).collect())
            .unwrap_or_default(),
    })
}
