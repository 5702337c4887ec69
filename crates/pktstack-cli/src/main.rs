use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use pktstack_core::registry::{LINKTYPE_ETHERNET, LINKTYPE_LINUX_SLL, registered_codes};
use pktstack_core::{Scope, Stack};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pktstack")]
#[command(version)]
#[command(
    about = "Decode raw frames into stacked protocol headers, and encode them back.",
    long_about = None,
    after_help = "Examples:\n  pktstack decode frame.bin --linktype sll --stdout\n  pktstack decode frame.bin -o stack.json --pretty\n  pktstack encode stack.json -o frame.bin"
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a raw frame file into a JSON layer stack.
    Decode {
        /// Path to a raw frame file (a glob matching one file is accepted)
        input: PathBuf,

        /// Link type of the first header: ethernet, sll, or a numeric LINKTYPE value
        #[arg(short, long, default_value = "ethernet", value_parser = parse_linktype)]
        linktype: u16,

        /// Output path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Encode a JSON layer stack back into a raw frame file.
    Encode {
        /// Path to a JSON stack, as written by `decode`
        input: PathBuf,

        /// Output path (raw bytes)
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            input,
            linktype,
            output,
            stdout,
            pretty,
            quiet,
        } => cmd_decode(input, linktype, output, stdout, pretty, quiet),
        Commands::Encode {
            input,
            output,
            quiet,
        } => cmd_encode(input, output, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

/// Decode output: the stack, plus the failure when decoding stopped early.
#[derive(Serialize)]
struct DecodeReport<'a> {
    #[serde(flatten)]
    stack: &'a Stack,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn cmd_decode(
    input: PathBuf,
    linktype: u16,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let bytes = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    debug!(path = %resolved_input.display(), len = bytes.len(), linktype, "decoding frame");

    if !registered_codes(Scope::LinkType).contains(&linktype) {
        warn!(linktype, "link type has no registered decoder; frame kept as payload");
    }

    let (stack, failure) = match pktstack_core::decode_from(&bytes, Scope::LinkType, linktype) {
        Ok(stack) => (stack, None),
        Err(err) => {
            let message = err.to_string();
            (err.stack, Some(message))
        }
    };

    let report = DecodeReport {
        stack: &stack,
        error: failure.clone(),
    };
    let json = serialize_json(&report, pretty)?;

    match output {
        Some(path) if !stdout => {
            write_output(&path, json.as_bytes())?;
            if !quiet {
                eprintln!(
                    "OK: {} layer(s), {} payload byte(s) -> {}",
                    stack.layers.len(),
                    stack.payload.len(),
                    path.display()
                );
            }
        }
        _ => println!("{}", json),
    }

    if let Some(message) = failure {
        return Err(CliError::new(
            message,
            Some("the partial stack was written; check the input length and link type".to_string()),
        ));
    }
    Ok(())
}

fn cmd_encode(input: PathBuf, output: PathBuf, quiet: bool) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    if same_file(&resolved_input, &output)? {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }

    let text = fs::read_to_string(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let stack: Stack = serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            format!("invalid stack JSON in {}: {}", resolved_input.display(), err),
            Some("expected the JSON written by `pktstack decode`".to_string()),
        )
    })?;

    let bytes = pktstack_core::encode(&stack).map_err(|err| {
        CliError::new(
            format!("encode failed: {}", err),
            Some("fix the offending field in the JSON stack".to_string()),
        )
    })?;
    write_output(&output, &bytes)?;

    if !quiet {
        eprintln!("OK: {} byte(s) written -> {}", bytes.len(), output.display());
    }
    Ok(())
}

fn parse_linktype(value: &str) -> Result<u16, String> {
    match value.to_ascii_lowercase().as_str() {
        "ethernet" | "en10mb" => Ok(LINKTYPE_ETHERNET),
        "sll" | "linux_sll" => Ok(LINKTYPE_LINUX_SLL),
        other => {
            let parsed = match other.strip_prefix("0x") {
                Some(hex) => u16::from_str_radix(hex, 16),
                None => other.parse::<u16>(),
            };
            parsed.map_err(|_| {
                format!("expected ethernet, sll, or a 16-bit LINKTYPE value, got '{value}'")
            })
        }
    }
}

fn serialize_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write output: {}", path.display()))?;
    Ok(())
}

fn same_file(input: &Path, output: &Path) -> Result<bool, CliError> {
    if !output.exists() {
        return Ok(false);
    }
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_abs = fs::canonicalize(output)
        .with_context(|| format!("Failed to resolve output path: {}", output.display()))?;
    Ok(input_abs == output_abs)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a single file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern, count, listed, more
                ),
                Some("pass a single file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
