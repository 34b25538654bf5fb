//! Error types for reqstash

use thiserror::Error;

/// Main error type for reqstash
///
/// Only hard input failures surface here. Malformed fragments inside an
/// otherwise readable input are dropped by the translators instead.
#[derive(Error, Debug)]
pub enum ReqstashError {
    #[error("Invalid Postman collection format: {0}")]
    InvalidCollection(String),

    #[error("Unknown import format")]
    UnknownFormat,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, ReqstashError>;
