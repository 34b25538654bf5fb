//! Postman collection flattening
//!
//! Walks the folder tree depth-first and emits one [`CanonicalRequest`] per
//! request leaf, in document order.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::types::{CollectionNode, PostmanBody, PostmanKeyValue, PostmanUrl, PostmanUrlObject};
use crate::errors::{ReqstashError, Result};
use crate::http;
use crate::models::{CanonicalRequest, ImportedCollection};

/// Joins folder names and the request name into a display name
pub const NAME_SEPARATOR: &str = " / ";

/// Maximum collection file size (64 MB)
const MAX_COLLECTION_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Load and translate a collection file
pub fn load_collection(path: &Path) -> Result<ImportedCollection> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > MAX_COLLECTION_FILE_SIZE {
        return Err(ReqstashError::InvalidCollection(format!(
            "file too large: {} bytes (max {} MB)",
            metadata.len(),
            MAX_COLLECTION_FILE_SIZE / 1024 / 1024
        )));
    }

    let content = fs::read_to_string(path)?;
    parse_collection(&content)
}

/// Parse collection JSON text and translate it
pub fn parse_collection(json: &str) -> Result<ImportedCollection> {
    let doc: Value = serde_json::from_str(json)?;
    extract_collection(&doc)
}

/// Translate an already parsed collection document.
///
/// Fails only when `info` is not an object or `item` is not an array.
/// Individual malformed entries degrade to empty fields.
pub fn extract_collection(doc: &Value) -> Result<ImportedCollection> {
    let info = doc
        .get("info")
        .filter(|info| info.is_object())
        .ok_or_else(|| ReqstashError::InvalidCollection("missing `info` object".to_string()))?;

    let items = doc
        .get("item")
        .and_then(Value::as_array)
        .ok_or_else(|| ReqstashError::InvalidCollection("missing `item` array".to_string()))?;

    let collection_name = info
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut requests = Vec::new();
    flatten(items, "", &mut requests);

    info!(
        collection = %collection_name,
        requests = requests.len(),
        "Extracted Postman collection"
    );

    Ok(ImportedCollection {
        collection_name,
        requests,
    })
}

fn flatten(items: &[Value], prefix: &str, out: &mut Vec<CanonicalRequest>) {
    for item in items {
        match CollectionNode::classify(item) {
            Some(CollectionNode::Request { name, request }) => {
                out.push(convert_request(join_name(prefix, name), request));
            }
            Some(CollectionNode::Folder { name, children }) => {
                flatten(children, &join_name(prefix, name), out);
            }
            None => debug!(item = %item, "skipping item that is neither request nor folder"),
        }
    }
}

/// Append `name` to a folder path, skipping empty segments
fn join_name(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}{}{}", prefix, NAME_SEPARATOR, name),
    }
}

fn convert_request(name: String, request: &Value) -> CanonicalRequest {
    let mut req = CanonicalRequest {
        name,
        ..CanonicalRequest::default()
    };

    if let Value::String(url) = request {
        req.url = url.clone();
        return req;
    }

    req.method = request
        .get("method")
        .and_then(Value::as_str)
        .and_then(http::normalize)
        .unwrap_or(http::GET)
        .to_string();

    if let Some(url) = request.get("url") {
        req.url = url_string(url);
    }

    if let Some(headers) = request.get("header") {
        collect_headers(headers, &mut req);
    }

    if let Some(body) = request.get("body") {
        req.body = body_string(body);
    }

    req
}

fn url_string(value: &Value) -> String {
    match PostmanUrl::deserialize(value) {
        Ok(PostmanUrl::Raw(raw)) => raw,
        Ok(PostmanUrl::Object(PostmanUrlObject { raw: Some(raw), .. })) => raw,
        Ok(PostmanUrl::Object(parts)) => assemble_url(&parts),
        Err(e) => {
            debug!(error = %e, "unreadable request url");
            String::new()
        }
    }
}

/// Rebuild a URL from its structured parts when `raw` is absent
fn assemble_url(parts: &PostmanUrlObject) -> String {
    let host = parts.host.as_ref().map(|h| h.join(".")).unwrap_or_default();
    if host.is_empty() {
        return String::new();
    }

    let mut url = match parts.protocol.as_deref() {
        Some(protocol) if !protocol.is_empty() => format!("{}://{}", protocol, host),
        _ => host,
    };

    if let Some(port) = parts.port.as_ref().and_then(super::types::scalar_text) {
        url.push(':');
        url.push_str(&port);
    }

    if let Some(path) = parts.path.as_ref().map(|p| p.join("/")).filter(|p| !p.is_empty()) {
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&path);
    }

    let query: Vec<String> = parts
        .query
        .iter()
        .filter_map(|q| PostmanKeyValue::deserialize(q).ok())
        .filter(|q| !q.disabled)
        .filter_map(|q| {
            let key = q.key?;
            Some(match q.value.as_ref().and_then(super::types::scalar_text) {
                Some(value) => format!("{}={}", key, value),
                None => key,
            })
        })
        .collect();

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    url
}

fn collect_headers(value: &Value, req: &mut CanonicalRequest) {
    match value {
        Value::Array(entries) => {
            for entry in entries {
                let pair = PostmanKeyValue::deserialize(entry)
                    .ok()
                    .and_then(|h| h.enabled_pair().map(|(k, v)| (k.to_string(), v)));
                match pair {
                    Some((key, value)) if req.insert_header(&key, &value) => {}
                    _ => debug!(header = %entry, "dropping header entry"),
                }
            }
        }
        // v2.0 allows the whole header block as one string
        Value::String(block) => {
            for line in block.lines() {
                if let Some((key, value)) = line.split_once(':') {
                    req.insert_header(key, value);
                }
            }
        }
        _ => debug!("ignoring unreadable header list"),
    }
}

fn body_string(value: &Value) -> String {
    let body = match PostmanBody::deserialize(value) {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "unreadable request body");
            return String::new();
        }
    };

    match body.mode.as_deref() {
        Some("raw") => body.raw.unwrap_or_default(),
        Some("formdata") | Some("form-data") => form_data_json(&body.formdata),
        Some("urlencoded") => urlencoded_text(&body.urlencoded),
        other => {
            debug!(mode = ?other, "unsupported body mode, leaving body empty");
            String::new()
        }
    }
}

/// Serialize text form fields as one compact JSON object
fn form_data_json(fields: &[Value]) -> String {
    let mut map = Map::new();
    for field in fields {
        let Ok(field) = PostmanKeyValue::deserialize(field) else {
            continue;
        };
        if field.is_file() {
            continue;
        }
        if let Some((key, value)) = field.enabled_pair() {
            map.insert(key.to_string(), Value::String(value));
        }
    }
    serde_json::to_string(&map).unwrap_or_default()
}

fn urlencoded_text(fields: &[Value]) -> String {
    let pairs: Vec<(String, String)> = fields
        .iter()
        .filter_map(|f| PostmanKeyValue::deserialize(f).ok())
        .filter_map(|f| f.enabled_pair().map(|(k, v)| (k.to_string(), v)))
        .collect();
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}
