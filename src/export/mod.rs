//! Rendering canonical requests back into external formats

pub mod curl;

pub use curl::{generate_curl_command, generate_curl_multiline};
