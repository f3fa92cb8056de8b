//! Digest CLI entry point.
//!
//! # Responsibility
//! - Read one raw export file, run the core pipeline, write the markdown
//!   digest.
//! - Keep all file and argument handling out of the core crate.
//!
//! Usage: `clipdigest [input] [output] [time_tol_secs] [clause_min_len] [trace]`

use clipdigest_core::{build_digest, default_log_level, init_logging, DedupConfig, Entry};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

const DEFAULT_INPUT: &str = "My Clippings.txt";
const DEFAULT_OUTPUT: &str = "clippings_digest.md";
const LOG_DIR_ENV: &str = "CLIPDIGEST_LOG_DIR";

/// File-level failures surfaced to the user; the core itself never fails.
#[derive(Debug)]
enum CliError {
    ReadInput { path: String, source: std::io::Error },
    WriteOutput { path: String, source: std::io::Error },
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadInput { path, source } => {
                write!(f, "cannot read export `{path}`: {source}")
            }
            Self::WriteOutput { path, source } => {
                write!(f, "cannot write digest `{path}`: {source}")
            }
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadInput { source, .. } | Self::WriteOutput { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    input: String,
    output: String,
    config: DedupConfig,
}

/// Positional arguments with defaults; malformed numeric extras fall back
/// to the tunable defaults rather than aborting.
fn parse_args(args: &[String]) -> CliOptions {
    let defaults = DedupConfig::default();
    let mut config = defaults.clone();

    if let Some(value) = args.get(2).and_then(|raw| raw.parse::<i64>().ok()) {
        config.time_tolerance_secs = value;
    }
    if let Some(value) = args.get(3).and_then(|raw| raw.parse::<usize>().ok()) {
        config.min_clause_len = value;
    }
    if let Some(value) = args.get(4).and_then(|raw| raw.parse::<u8>().ok()) {
        config.trace = value != 0;
    }

    CliOptions {
        input: args.first().cloned().unwrap_or_else(|| DEFAULT_INPUT.to_string()),
        output: args.get(1).cloned().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
        config,
    }
}

/// Renders the digest as markdown: one heading per document, each entry's
/// body, or a bracketed kind-plus-metadata placeholder when the body is
/// empty (bookmarks).
fn render_digest(digest: &BTreeMap<String, Vec<Entry>>) -> String {
    let mut out = String::new();
    for (title, entries) in digest {
        out.push_str(&format!("## {title}\n\n"));
        for entry in entries {
            if entry.body.is_empty() {
                out.push_str(&format!(
                    "[{}] {}\n\n",
                    entry.kind.as_str(),
                    entry.metadata_raw
                ));
            } else {
                out.push_str(&format!("{}\n\n", entry.body));
            }
        }
    }
    out
}

/// Runs the pipeline end to end; returns the number of documents kept.
fn run(options: &CliOptions) -> Result<usize, CliError> {
    let bytes = std::fs::read(&options.input).map_err(|source| CliError::ReadInput {
        path: options.input.clone(),
        source,
    })?;
    // Decoding errors in the source are tolerated, not fatal.
    let content = String::from_utf8_lossy(&bytes);

    let digest = build_digest(&content, &options.config);
    let rendered = render_digest(&digest);

    std::fs::write(&options.output, rendered).map_err(|source| CliError::WriteOutput {
        path: options.output.clone(),
        source,
    })?;

    Ok(digest.len())
}

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args);

    match run(&options) {
        Ok(documents) => {
            println!("digest complete: {documents} documents -> {}", options.output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
