//! erbfmt - Auto-formatter for ERB templates

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use erbfmt::ignore::IgnoreList;
use erbfmt::process::format_file;
use erbfmt::{find_directive, parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Suffix of the files picked up from directories
const ERB_EXTENSION: &str = "erb";

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<ExitCode> {
    let args = parse_args();
    init_tracing(args.debug);

    let explicit_stdin = args.reads_stdin();
    if explicit_stdin && !(args.inputs.is_empty() || is_dash(&args.inputs)) {
        anyhow::bail!("Can't read both stdin and a list of files");
    }

    // No inputs and running interactively: print usage; otherwise read from stdin
    if args.inputs.is_empty() && !explicit_stdin && io::stdin().is_terminal() {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    let ignore = IgnoreList::load(&std::env::current_dir()?);

    if explicit_stdin || args.inputs.is_empty() {
        let filename = args.stdin_filename.clone();
        let config = build_config(&args, filename.as_deref())?;
        process_stdin(&config, &args, &ignore)?;
        return Ok(ExitCode::SUCCESS);
    }

    // An explicit config file applies to every file; otherwise each file
    // discovers its own
    let base_config = match &args.config {
        Some(_) => Some(build_config(&args, None)?),
        None => None,
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No ERB files found to format.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Printed output must keep input order
    let use_sequential = !args.write || args.jobs == Some(1);
    let errors = if use_sequential {
        process_files_sequential(&files, base_config.as_ref(), &args, &ignore)
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args, &ignore)
    };

    Ok(if errors == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn is_dash(inputs: &[PathBuf]) -> bool {
    inputs.len() == 1 && inputs[0].as_os_str() == "-"
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug { "erbfmt=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(debug),
        )
        .try_init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("using explicit config file {}", config_path.display());
        Config::from_toml_file(config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            tracing::debug!("no config files discovered for {}", start.display());
        }
        for f in &discovered {
            tracing::debug!("discovered config file {}", f.display());
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(line_width) = args.line_width {
        config.line_width = line_width;
    }
    if let Some(single) = args.single_class_per_line {
        config.single_class_per_line = single;
    }
    if let Some(command) = &args.code_formatter {
        config.code_formatter = Some(command.clone());
    }

    tracing::debug!(?config, "configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            // Non-recursive: only direct children
            let max_depth = if args.recursive { 256 } else { 1 };
            // WalkDir reports symlink loops as errors, which are skipped
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file() && is_erb_file(path) && !is_excluded(path, &exclude_patterns) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            eprintln!("No such file or directory: {}", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against each path component, the file name included
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

fn is_erb_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ERB_EXTENSION))
}

/// Process files one after another, returning the number of failures
fn process_files_sequential(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
    ignore: &IgnoreList,
) -> usize {
    let mut errors = 0;
    for path in files {
        if let Err(e) = process_with_config(path, base_config, args, ignore) {
            errors += 1;
            eprintln!("Error formatting {}: {e:#}", path.display());
        }
    }
    errors
}

/// Process files in parallel using Rayon, returning the number of failures
fn process_files_parallel(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
    ignore: &IgnoreList,
) -> usize {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match process_with_config(path, base_config, args, ignore) {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {e:#}", path.display());
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Formatted {success} files successfully.");
        } else {
            eprintln!("Formatted {success} files, {errors} errors.");
        }
    }
    errors
}

/// Use the base config if provided, otherwise discover a per-file config
fn process_with_config(
    path: &Path,
    base_config: Option<&Config>,
    args: &CliArgs,
    ignore: &IgnoreList,
) -> Result<()> {
    match base_config {
        Some(config) => process_single_file(path, config, args, ignore),
        None => process_single_file(path, &build_config(args, Some(path))?, args, ignore),
    }
}

/// Apply the file's directive, if any. Returns `false` when the directive
/// turns formatting off.
fn apply_directive_overrides(config: &mut Config, contents: &str, source_name: &str) -> bool {
    let Some(overrides) = find_directive(contents) else {
        return true;
    };
    tracing::debug!(?overrides, "found file directive in {source_name}");
    overrides.apply(config);
    !overrides.disabled
}

/// Format `contents`, or `None` when the document is to be left untouched
fn format_contents(
    contents: &str,
    config: &Config,
    ignore: &IgnoreList,
    path: &Path,
) -> Result<Option<Vec<u8>>> {
    let name = path.to_string_lossy();
    if ignore.should_ignore(path) {
        tracing::debug!("{name} is on the ignore list");
        return Ok(None);
    }

    let mut file_config = config.clone();
    if !apply_directive_overrides(&mut file_config, contents, &name) {
        tracing::debug!("formatting disabled by directive in {name}");
        return Ok(None);
    }

    let reader = BufReader::new(Cursor::new(contents.as_bytes()));
    let mut output = Vec::new();
    format_file(reader, &mut output, &file_config, &name)?;
    Ok(Some(output))
}

/// Process a single file
fn process_single_file(
    path: &Path,
    config: &Config,
    args: &CliArgs,
    ignore: &IgnoreList,
) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                file_size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if args.write && !args.silent {
        eprintln!("Formatting: {}", path.display());
    }

    match format_contents(&contents, config, ignore, path)? {
        Some(output) if args.write => {
            if output != contents.as_bytes() {
                std::fs::write(path, &output)?;
            }
        }
        Some(output) => io::stdout().lock().write_all(&output)?,
        None if args.write => {}
        None => io::stdout().lock().write_all(contents.as_bytes())?,
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs, ignore: &IgnoreList) -> Result<()> {
    let mut contents = String::new();
    io::stdin()
        .take(DEFAULT_MAX_FILE_SIZE + 1)
        .read_to_string(&mut contents)?;

    if u64::try_from(contents.len()).unwrap_or(u64::MAX) > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large (exceeds limit of {} MB)",
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let path = args
        .stdin_filename
        .clone()
        .unwrap_or_else(|| PathBuf::from("-"));

    // Always output to stdout when reading from stdin
    let mut stdout = io::stdout().lock();
    match format_contents(&contents, config, ignore, &path)? {
        Some(output) => stdout.write_all(&output)?,
        None => stdout.write_all(contents.as_bytes())?,
    }

    Ok(())
}

fn print_usage() {
    println!(
        "erbfmt v{} - ERB template formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Formats HTML templates with embedded Ruby (.html.erb).");
    println!();
    println!("Usage:");
    println!("  erbfmt [OPTIONS] <FILE>...");
    println!("  erbfmt [OPTIONS] -r <DIRECTORY>");
    println!("  erbfmt [OPTIONS] --stdin-filename <PATH> < file.html.erb");
    println!("  cat file.html.erb | erbfmt");
    println!();
    println!("Examples:");
    println!("  erbfmt index.html.erb           # Print the formatted file");
    println!("  erbfmt -w app/views/*.erb       # Format files in place");
    println!("  erbfmt -w -r app/views          # Recursively format a directory");
    println!("  erbfmt -l 100 index.html.erb    # Use a 100-column line width");
    println!();
    println!("Options:");
    println!("  -w, --write                     Write formatted output back to the files");
    println!("  --stdin                         Read the document from stdin");
    println!("  --stdin-filename <PATH>         Name of the stdin document (implies --stdin)");
    println!("  -l, --line-width <NUM>          Max line width [default: 80]");
    println!("  --single-class-per-line         One class per line when a class is split");
    println!("  --code-formatter <CMD>          Command formatting embedded Ruby");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -j, --jobs <NUM>                Parallel jobs with --write (0=auto, 1=sequential)");
    println!("  -D, --debug                     Enable debug output");
    println!("  -S, --silent                    Silent mode");
    println!("  -h, --help                      Print help");
    println!();
    println!("Files listed in .format-erb-ignore (one glob per line) are left untouched.");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for erbfmt.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks erbfmt.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
