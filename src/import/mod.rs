//! Request import
//!
//! Translators from external request formats into [`CanonicalRequest`]:
//!
//! - **cURL**: a single command line, see [`curl::parse_curl`]
//! - **Postman**: a v2 collection document, see [`postman::extract_collection`]
//!
//! Both translators are pure functions. They never persist, authenticate or
//! execute anything.

pub mod curl;
pub mod postman;

use serde::Serialize;
use tracing::debug;

use crate::errors::{ReqstashError, Result};
use crate::models::{CanonicalRequest, ImportedCollection};

pub use curl::parse_curl;
pub use postman::{extract_collection, load_collection, parse_collection};

/// Input formats the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Curl,
    Postman,
}

/// Result of [`import_auto`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImportOutcome {
    /// A single request from a cURL command
    Request(CanonicalRequest),
    /// A flattened collection
    Collection(ImportedCollection),
}

impl ImportOutcome {
    /// All requests carried by this outcome
    pub fn requests(&self) -> &[CanonicalRequest] {
        match self {
            ImportOutcome::Request(req) => std::slice::from_ref(req),
            ImportOutcome::Collection(c) => &c.requests,
        }
    }
}

/// Guess the format of `content`
pub fn detect_format(content: &str) -> Option<ImportFormat> {
    let trimmed = content.trim_start();

    let first_word = trimmed.split_whitespace().next().unwrap_or_default();
    if first_word.eq_ignore_ascii_case("curl") {
        return Some(ImportFormat::Curl);
    }

    if trimmed.starts_with('{') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
            if json.get("info").is_some() && json.get("item").is_some() {
                return Some(ImportFormat::Postman);
            }
        }
    }

    None
}

/// Detect format and import
pub fn import_auto(content: &str) -> Result<ImportOutcome> {
    let format = detect_format(content).ok_or(ReqstashError::UnknownFormat)?;
    debug!(?format, "Detected import format");

    match format {
        ImportFormat::Curl => Ok(ImportOutcome::Request(parse_curl(content))),
        ImportFormat::Postman => parse_collection(content).map(ImportOutcome::Collection),
    }
}
