//! reqstash library interface
//!
//! Translates cURL command lines and Postman v2 collections into one
//! canonical request shape for a saved-request store.
//!
//! # Module Organization
//!
//! - [`import`] - cURL and Postman translators, format detection
//! - [`models`] - Canonical request types (CanonicalRequest, ImportedCollection)
//! - [`export`] - Rendering requests back into curl commands
//! - [`store`] - Persistence boundary (RequestStore, ImportSummary)
//! - [`errors`] - Error types (ReqstashError, Result)
//! - [`core`] - CLI execution logic

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod http;
pub mod import;
pub mod models;
pub mod status;
pub mod store;

pub use errors::{ReqstashError, Result};
pub use import::{extract_collection, import_auto, parse_collection, parse_curl};
pub use models::{CanonicalRequest, ImportedCollection};
