//! Data model shared by the importers, the exporter and the store

pub mod types;

pub use types::{CanonicalRequest, HeaderMap, ImportedCollection};
