//! Canonical request types
//!
//! Both importers converge on [`CanonicalRequest`]. Headers use [`IndexMap`]
//! so serialized output keeps the order in which headers were first seen,
//! even though the mapping itself carries no ordering semantics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::http;

/// Header name to value. Keys are unique; a repeated key overwrites the value.
pub type HeaderMap = IndexMap<String, String>;

/// The normalized request shape produced by every importer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRequest {
    /// Display name. Empty for requests imported from a bare cURL command.
    #[serde(default)]
    pub name: String,

    /// Uppercase HTTP verb from [`http::STANDARD_METHODS`]
    pub method: String,

    /// Absolute URL, or empty when none could be located
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub headers: HeaderMap,

    /// Flattened textual body, empty when the request has none
    #[serde(default)]
    pub body: String,
}

impl Default for CanonicalRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            method: http::GET.to_string(),
            url: String::new(),
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }
}

impl CanonicalRequest {
    /// Insert a header, dropping it when either side is empty after trimming
    ///
    /// Returns whether the header was kept.
    pub fn insert_header(&mut self, key: &str, value: &str) -> bool {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return false;
        }
        self.headers.insert(key.to_string(), value.to_string());
        true
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether anything usable was extracted
    ///
    /// An empty URL is the caller-facing signal that an import produced nothing.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Result of translating a whole collection document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedCollection {
    pub collection_name: String,
    pub requests: Vec<CanonicalRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_get() {
        let req = CanonicalRequest::default();
        assert_eq!(req.method, "GET");
        assert!(req.url.is_empty());
        assert!(!req.has_url());
    }

    #[test]
    fn test_insert_header_drops_empty_parts() {
        let mut req = CanonicalRequest::default();
        assert!(req.insert_header(" Accept ", " text/plain "));
        assert!(!req.insert_header("", "x"));
        assert!(!req.insert_header("X-Empty", "   "));
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers["Accept"], "text/plain");
    }

    #[test]
    fn test_insert_header_last_wins() {
        let mut req = CanonicalRequest::default();
        req.insert_header("X-Trace", "1");
        req.insert_header("Accept", "*/*");
        req.insert_header("X-Trace", "2");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.headers["X-Trace"], "2");
        assert_eq!(req.header("x-trace"), Some("2"));
    }

    #[test]
    fn test_collection_serializes_camel_case() {
        let collection = ImportedCollection {
            collection_name: "C".to_string(),
            requests: vec![],
        };
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["collectionName"], "C");
        assert!(json["requests"].as_array().unwrap().is_empty());
    }
}
