//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for reqstash.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Import cURL commands and Postman collections as canonical requests
#[derive(Parser, Debug, Clone)]
#[command(name = "reqstash", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub output: OutputArgs,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Output format for structured logging: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Print debug logs to stderr
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Translate one cURL command
    Curl {
        /// The command line, or '-' to read it from stdin
        #[arg(value_name = "COMMAND", allow_hyphen_values = true)]
        command: String,
    },

    /// Translate a Postman v2 collection
    Postman {
        /// Collection file, or '-' to read from stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Detect the input format and translate it
    Import {
        /// Input file, or '-' to read from stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Options controlling what happens with translated requests
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (defaults to the config file, then json)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Single-line output: compact JSON, or one curl command per line
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub compact: bool,

    /// Persist the translated requests to the store file
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub save: bool,

    /// Store file to save into (overrides the config file)
    #[arg(long, value_name = "PATH", env = "REQSTASH_STORE", global = true)]
    pub store: Option<PathBuf>,
}

/// Log format for structured output (CI/CD)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
