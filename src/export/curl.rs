//! Curl command generation
//!
//! Converts canonical requests to equivalent curl commands for sharing and
//! debugging. The output re-imports through [`crate::import::parse_curl`]
//! to the same request, except that the importer trims surrounding
//! whitespace from the body and treats backslash-newline sequences in it as
//! line continuations.

use crate::http;
use crate::models::CanonicalRequest;

/// Generate a single-line curl command
pub fn generate_curl_command(req: &CanonicalRequest) -> String {
    curl_parts(req).join(" ")
}

/// Generate a curl command split over lines with `\` continuations,
/// the way browser dev tools print them
pub fn generate_curl_multiline(req: &CanonicalRequest) -> String {
    let parts = curl_parts(req);
    let mut lines: Vec<String> = Vec::with_capacity(parts.len());
    let mut iter = parts.into_iter();

    // `curl` and the URL share the first line
    let head: Vec<String> = iter.by_ref().take(2).collect();
    lines.push(head.join(" "));
    while let Some(part) = iter.next() {
        if part.starts_with('-') {
            match iter.next() {
                Some(arg) => lines.push(format!("{} {}", part, arg)),
                None => lines.push(part),
            }
        } else {
            lines.push(part);
        }
    }

    lines.join(" \\\n  ")
}

fn curl_parts(req: &CanonicalRequest) -> Vec<String> {
    let mut parts: Vec<String> = vec!["curl".to_string()];

    parts.push(quote(&req.url));

    // Only spell out the method when the importer would not infer it
    let has_body = !req.body.is_empty();
    if req.method != http::infer(has_body) {
        parts.push("-X".to_string());
        parts.push(req.method.clone());
    }

    for (name, value) in &req.headers {
        parts.push("-H".to_string());
        parts.push(quote(&format!("{}: {}", name, value)));
    }

    if has_body {
        parts.push("--data-raw".to_string());
        parts.push(quote(&req.body));
    }

    parts
}

/// Single-quote a shell word, escaping embedded single quotes
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_curl;

    fn request(method: &str, url: &str, headers: &[(&str, &str)], body: &str) -> CanonicalRequest {
        let mut req = CanonicalRequest {
            method: method.to_string(),
            url: url.to_string(),
            body: body.to_string(),
            ..CanonicalRequest::default()
        };
        for (k, v) in headers {
            req.insert_header(k, v);
        }
        req
    }

    #[test]
    fn test_simple_get() {
        let req = request("GET", "https://example.com", &[], "");
        assert_eq!(generate_curl_command(&req), "curl 'https://example.com'");
    }

    #[test]
    fn test_post_with_body_omits_method() {
        let req = request("POST", "https://x.io", &[("Content-Type", "application/json")], "{\"a\":1}");
        assert_eq!(
            generate_curl_command(&req),
            "curl 'https://x.io' -H 'Content-Type: application/json' --data-raw '{\"a\":1}'"
        );
    }

    #[test]
    fn test_get_with_body_keeps_method() {
        let req = request("GET", "https://x.io", &[], "q");
        assert!(generate_curl_command(&req).contains("-X GET"));
    }

    #[test]
    fn test_single_quotes_are_escaped() {
        let req = request("PUT", "https://x.io", &[], "it's");
        let cmd = generate_curl_command(&req);
        assert!(cmd.contains(r#"'it'"'"'s'"#));
    }

    #[test]
    fn test_round_trip() {
        let cases = vec![
            request("GET", "https://x.io", &[], ""),
            request("DELETE", "https://x.io/items/1", &[("Authorization", "Bearer t")], ""),
            request("POST", "https://x.io", &[("A", "1"), ("B", "two words")], "{\"k\": \"it's\"}"),
            request("PATCH", "//cdn.x.io/p", &[], "a=1&b=2"),
            request("GET", "https://x.io", &[], "query-ish"),
        ];
        for original in cases {
            assert_eq!(parse_curl(&generate_curl_command(&original)), original);
            assert_eq!(parse_curl(&generate_curl_multiline(&original)), original);
        }
    }

    #[test]
    fn test_round_trip_trims_body() {
        let original = request("POST", "https://x.io", &[], "{\"a\": 1}\n");
        let reimported = parse_curl(&generate_curl_command(&original));
        assert_eq!(reimported.body, "{\"a\": 1}");
        assert_eq!(reimported.method, "POST");
    }

    #[test]
    fn test_multiline_layout() {
        let req = request("PUT", "https://x.io", &[("A", "1")], "x");
        assert_eq!(
            generate_curl_multiline(&req),
            "curl 'https://x.io' \\\n  -X PUT \\\n  -H 'A: 1' \\\n  --data-raw 'x'"
        );
    }
}
