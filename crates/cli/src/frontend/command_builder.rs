use clap::builder::{OsStringValueParser, RangedU64ValueParser};
use clap::{Arg, ArgAction, Command as ClapCommand};

use super::DEFAULT_ALGORITHM;

pub(crate) fn clap_command(program_name: &'static str) -> ClapCommand {
    ClapCommand::new(program_name)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Computes several checksums per file while reading each file once.")
        .after_help(
            "Use '-' as the only PATH to hash standard input. Standard input waits \
             up to a day between blocks unless --timeout is given. \
             Set HASHFAN_LOG to override the log filter.",
        )
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .value_name("ALGORITHMS")
                .default_value(DEFAULT_ALGORITHM)
                .help("Algorithms joined with '+', or 'all'"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Descend into subdirectories"),
        )
        .arg(
            Arg::new("follow-symlinks")
                .long("follow-symlinks")
                .action(ArgAction::SetTrue)
                .help("Descend into symlinked directories instead of skipping them"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more detail to stderr (repeatable)"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List the supported algorithms with their weights and exit"),
        )
        .arg(
            Arg::new("quick")
                .short('q')
                .long("quick")
                .value_name("SEQUENCE")
                .conflicts_with_all(["paths", "list"])
                .help("Hash a literal instead of files: txt:TEXT, hex:DIGITS or dec:N,N,..."),
        )
        .arg(
            Arg::new("expect")
                .short('e')
                .long("expect")
                .value_name("HEX")
                .conflicts_with("list")
                .help("Exit with status 4 unless every digest equals this value"),
        )
        .arg(count_arg("chunk-size", "BYTES", "Block size used when reading"))
        .arg(count_arg("readers", "N", "Maximum number of files read concurrently"))
        .arg(count_arg("workers", "N", "Worker threads for standard input"))
        .arg(count_arg(
            "queue-capacity",
            "CHUNKS",
            "Maximum blocks buffered per queue",
        ))
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(RangedU64ValueParser::<u64>::new().range(1..))
                .help("Give up when a pipeline stage waits this long for data [default: 60, or 86400 for stdin]"),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .num_args(0..)
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
}

fn count_arg(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(value_name)
        .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
        .help(help)
}
