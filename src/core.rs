use std::io::{self, Read, Write};
use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, LogFormat};
use crate::config::{Config, OutputFormat};
use crate::errors::{ReqstashError, Result};
use crate::export::{generate_curl_command, generate_curl_multiline};
use crate::import::{import_auto, load_collection, parse_collection, parse_curl, ImportOutcome};
use crate::models::CanonicalRequest;
use crate::status::ExitStatus;
use crate::store::{save_all, ImportSummary, JsonFileStore};

/// Main entry point for the CLI.
///
/// Handles argument parsing, logging and configuration setup, and
/// dispatches to the requested importer.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_tracing(parsed.log_format.unwrap_or_default(), parsed.debug);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            Config::default()
        }
    };
    debug!(config_dir = %config.config_dir.display(), "Loaded configuration");

    match execute(&parsed, &config) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitStatus::Error
        }
    }
}

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence; otherwise `--debug` selects debug level.
fn init_tracing(format: LogFormat, debug: bool) {
    let default_directive = if debug { "reqstash=debug" } else { "reqstash=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    // A subscriber may already be installed when embedded; keep it
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

fn execute(args: &Args, config: &Config) -> Result<ExitStatus> {
    let outcome = match &args.command {
        Command::Curl { command } => {
            let text = if command == "-" { read_stdin()? } else { command.clone() };
            ImportOutcome::Request(parse_curl(&text))
        }
        Command::Postman { file } => {
            let collection = if is_stdin(file) {
                parse_collection(&read_stdin()?)?
            } else {
                load_collection(file)?
            };
            ImportOutcome::Collection(collection)
        }
        Command::Import { file } => import_auto(&read_input(file)?)?,
    };

    if let ImportOutcome::Request(req) = &outcome {
        if !req.has_url() {
            return Err(ReqstashError::Argument(
                "No URL found in cURL command".to_string(),
            ));
        }
    }

    let summary = if args.output.save {
        let path = args
            .output
            .store
            .clone()
            .unwrap_or_else(|| config.store_path.clone());
        let mut store = JsonFileStore::open(path)?;
        let summary = save_all(&mut store, outcome.requests());
        eprintln!(
            "Saved {} of {} request(s) to {}",
            summary.saved_requests,
            summary.total_requests,
            store.path().display()
        );
        Some(summary)
    } else {
        None
    };

    let format = args.output.format.unwrap_or(config.output_format);
    let compact = args.output.compact || config.compact;

    let rendered = render(&outcome, summary, format, compact)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", rendered)?;

    Ok(ExitStatus::Success)
}

fn render(
    outcome: &ImportOutcome,
    summary: Option<ImportSummary>,
    format: OutputFormat,
    compact: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(outcome)?;
            if let (ImportOutcome::Collection(_), Some(summary)) = (outcome, summary) {
                if let (Some(obj), serde_json::Value::Object(extra)) =
                    (value.as_object_mut(), serde_json::to_value(summary)?)
                {
                    obj.extend(extra);
                }
            }
            Ok(if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            })
        }
        OutputFormat::Curl => {
            let generate: fn(&CanonicalRequest) -> String =
                if compact { generate_curl_command } else { generate_curl_multiline };
            let blocks: Vec<String> = match outcome {
                ImportOutcome::Request(req) => vec![generate(req)],
                ImportOutcome::Collection(c) => c
                    .requests
                    .iter()
                    .map(|req| format!("# {}\n{}", req.name, generate(req)))
                    .collect(),
            };
            Ok(blocks.join("\n\n"))
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        read_stdin()
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn read_stdin() -> Result<String> {
    if atty::is(atty::Stream::Stdin) {
        warn!("Refusing to wait for input on an interactive terminal");
        return Err(ReqstashError::Argument(
            "expected input on stdin, got a terminal".to_string(),
        ));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
