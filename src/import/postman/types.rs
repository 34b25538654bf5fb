//! Postman collection data structures
//!
//! Based on the Postman Collection Format v2.0 / v2.1 schema:
//! https://schema.postman.com/collection/json/v2.1.0/draft-07/collection.json
//!
//! Only the pieces the importer reads are modelled. Each field is decoded on
//! its own so a null or mistyped field degrades that field alone.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a field, falling back to its default when it is null or mistyped
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// One element of an `item` array
#[derive(Debug, Clone, Copy)]
pub enum CollectionNode<'a> {
    /// A leaf carrying a `request` (object, or a bare URL string)
    Request { name: &'a str, request: &'a Value },
    /// A folder with its own nested `item` array
    Folder { name: &'a str, children: &'a [Value] },
}

impl<'a> CollectionNode<'a> {
    /// Classify an item. A `request` field wins over a nested `item` array.
    ///
    /// Returns `None` for elements that are neither shape.
    pub fn classify(item: &'a Value) -> Option<Self> {
        let name = item.get("name").and_then(Value::as_str).unwrap_or_default();

        if let Some(request) = item.get("request").filter(|r| !r.is_null()) {
            return Some(CollectionNode::Request { name, request });
        }

        item.get("item")
            .and_then(Value::as_array)
            .map(|children| CollectionNode::Folder {
                name,
                children: children.as_slice(),
            })
    }
}

/// `request.url`: either the raw string or a structured object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    Raw(String),
    Object(PostmanUrlObject),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanUrlObject {
    #[serde(default, deserialize_with = "lenient")]
    pub raw: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub protocol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub host: Option<UrlSegments>,
    #[serde(default, deserialize_with = "lenient")]
    pub port: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub path: Option<UrlSegments>,
    #[serde(default, deserialize_with = "lenient")]
    pub query: Vec<Value>,
}

/// `host` and `path` are either pre-joined strings or segment arrays
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UrlSegments {
    Joined(String),
    Segments(Vec<Value>),
}

impl UrlSegments {
    /// Join the segments with `sep`. Segment objects contribute their `value`.
    pub fn join(&self, sep: &str) -> String {
        match self {
            UrlSegments::Joined(s) => s.clone(),
            UrlSegments::Segments(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(_) => part.get("value").and_then(scalar_text),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(sep),
        }
    }
}

/// A `{key, value, disabled}` entry, used by headers, form fields and queries
#[derive(Debug, Clone, Deserialize)]
pub struct PostmanKeyValue {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub disabled: bool,
    /// `"text"` or `"file"` for form-data fields
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
}

impl PostmanKeyValue {
    /// Key and textual value of an enabled entry
    pub fn enabled_pair(&self) -> Option<(&str, String)> {
        if self.disabled {
            return None;
        }
        let key = self.key.as_deref()?;
        let value = self.value.as_ref().and_then(scalar_text)?;
        Some((key, value))
    }

    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some("file")
    }
}

/// `request.body`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanBody {
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub raw: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub formdata: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub urlencoded: Vec<Value>,
}

/// Text form of a JSON scalar; `None` for null, arrays and objects
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_request_and_folder() {
        let request = json!({"name": "r", "request": {"method": "GET"}});
        let folder = json!({"name": "F", "item": []});
        let neither = json!({"name": "x"});

        assert!(matches!(
            CollectionNode::classify(&request),
            Some(CollectionNode::Request { name: "r", .. })
        ));
        assert!(matches!(
            CollectionNode::classify(&folder),
            Some(CollectionNode::Folder { name: "F", .. })
        ));
        assert!(CollectionNode::classify(&neither).is_none());
    }

    #[test]
    fn test_request_wins_over_item() {
        let both = json!({"name": "r", "request": "http://x", "item": []});
        assert!(matches!(
            CollectionNode::classify(&both),
            Some(CollectionNode::Request { .. })
        ));
    }

    #[test]
    fn test_url_segments_join() {
        let host: UrlSegments = serde_json::from_value(json!(["api", "example", "com"])).unwrap();
        assert_eq!(host.join("."), "api.example.com");

        let path: UrlSegments =
            serde_json::from_value(json!(["users", {"type": "string", "value": "42"}])).unwrap();
        assert_eq!(path.join("/"), "users/42");

        let joined: UrlSegments = serde_json::from_value(json!("a/b")).unwrap();
        assert_eq!(joined.join("/"), "a/b");
    }

    #[test]
    fn test_enabled_pair() {
        let entry: PostmanKeyValue =
            serde_json::from_value(json!({"key": "k", "value": 5})).unwrap();
        assert_eq!(entry.enabled_pair(), Some(("k", "5".to_string())));

        let disabled: PostmanKeyValue =
            serde_json::from_value(json!({"key": "k", "value": "v", "disabled": true})).unwrap();
        assert_eq!(disabled.enabled_pair(), None);

        let file: PostmanKeyValue =
            serde_json::from_value(json!({"key": "f", "type": "file", "src": "/tmp/a"})).unwrap();
        assert!(file.is_file());
        assert_eq!(file.enabled_pair(), None);
    }
}
