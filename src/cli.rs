//! Command-line interface for erbfmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Rewrite files in place instead of printing them
    pub write: bool,

    /// Read one document from stdin
    pub stdin: bool,

    /// Name used for the stdin document (implies `stdin`)
    pub stdin_filename: Option<PathBuf>,

    /// Maximum line width
    pub line_width: Option<usize>,

    /// One class per line when a class attribute is split
    pub single_class_per_line: Option<bool>,

    /// External command formatting embedded Ruby
    pub code_formatter: Option<String>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no status output)
    pub silent: bool,
}

impl CliArgs {
    /// Whether the document comes from stdin
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.stdin
            || self.stdin_filename.is_some()
            || (self.inputs.len() == 1 && self.inputs[0].as_os_str() == "-")
    }
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("erbfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Auto-formatter for ERB templates (HTML with embedded Ruby)")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .help("Write formatted output back to the files")
                .action(ArgAction::SetTrue)
                .overrides_with("no-write"),
        )
        .arg(
            Arg::new("no-write")
                .long("no-write")
                .help("Print formatted output (default)")
                .action(ArgAction::SetTrue)
                .overrides_with("write"),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Read the document from stdin")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdin-filename")
                .long("stdin-filename")
                .help("Filename for the stdin document (implies --stdin)")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("line-width")
                .short('l')
                .long("line-width")
                .help("Maximum line width [default: 80]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("single-class-per-line")
                .long("single-class-per-line")
                .help("Put each class on its own line when a class attribute is split")
                .value_name("BOOL")
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            Arg::new("code-formatter")
                .long("code-formatter")
                .help("Command formatting embedded Ruby; {width} is replaced by the available width")
                .value_name("CMD"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to config file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Process directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (config, block stack, code formatting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no status output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        write: matches.get_flag("write"),
        stdin: matches.get_flag("stdin"),
        stdin_filename: matches.get_one::<PathBuf>("stdin-filename").cloned(),
        line_width: matches.get_one::<usize>("line-width").copied(),
        single_class_per_line: matches.get_one::<bool>("single-class-per-line").copied(),
        code_formatter: matches.get_one::<String>("code-formatter").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}
