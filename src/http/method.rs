//! HTTP method constants and normalization

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP PUT method
pub const PUT: &str = "PUT";

/// HTTP PATCH method
pub const PATCH: &str = "PATCH";

/// HTTP DELETE method
pub const DELETE: &str = "DELETE";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// HTTP OPTIONS method
pub const OPTIONS: &str = "OPTIONS";

/// HTTP TRACE method
pub const TRACE: &str = "TRACE";

/// HTTP CONNECT method
pub const CONNECT: &str = "CONNECT";

/// All methods a canonical request may carry
pub const STANDARD_METHODS: &[&str] = &[
    GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS, TRACE, CONNECT,
];

/// Normalize a method token to its uppercase canonical form.
///
/// Surrounding whitespace is ignored. Returns `None` for anything outside
/// [`STANDARD_METHODS`], so callers can fall back to their own default.
pub fn normalize(token: &str) -> Option<&'static str> {
    let token = token.trim();
    STANDARD_METHODS
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(token))
}

/// Infer HTTP method based on whether the request has data
pub fn infer(has_data: bool) -> &'static str {
    if has_data {
        POST
    } else {
        GET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("patch"), Some(PATCH));
        assert_eq!(normalize(" Delete "), Some(DELETE));
        assert_eq!(normalize("OPTIONS"), Some(OPTIONS));
        assert_eq!(normalize("FETCH"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_infer() {
        assert_eq!(infer(false), GET);
        assert_eq!(infer(true), POST);
    }
}
