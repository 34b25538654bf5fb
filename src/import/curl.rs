//! cURL command import
//!
//! Translates a single curl invocation (as copied from a browser's dev tools
//! or an API doc) into a [`CanonicalRequest`].
//!
//! # Example
//!
//! ```
//! use reqstash::import::curl::parse_curl;
//!
//! let req = parse_curl(r#"curl -X POST "https://api.example.com/users" -H "Content-Type: application/json" -d '{"name":"a"}'"#);
//! assert_eq!(req.method, "POST");
//! assert_eq!(req.url, "https://api.example.com/users");
//! assert_eq!(req.headers["Content-Type"], "application/json");
//! assert_eq!(req.body, r#"{"name":"a"}"#);
//! ```
//!
//! Parsing never fails. Anything that cannot be understood is dropped and
//! the corresponding field keeps its default.

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::http;
use crate::models::CanonicalRequest;

/// A backslash, optional spaces, a newline and the indentation after it
static LINE_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\s*\n\s*").expect("static regex"));

/// URL prefixes recognized when locating the request target
const URL_PREFIXES: &[&str] = &["http://", "https://", "//"];

/// Short flags that never take an argument and may be clustered (`-sSL`)
const FLAGS_WITHOUT_ARGS: &[char] = &[
    's', 'S', 'L', 'v', 'k', 'I', 'i', 'O', 'J', 'f', 'g', 'G', 'N', 'j', 'n', 'q', 'Z',
    '0', '1', '2', '3', '4', '6',
];

/// Short flags whose argument follows as the next token, or attached (`-XPOST`)
const SHORT_FLAGS_WITH_ARGS: &[char] = &[
    'X', 'H', 'd', 'u', 'A', 'e', 'b', 'c', 'x', 'o', 'T', 'F', 'm', 'E', 'r', 'w', 'U',
    'K', 'C', 'Y', 'y', 'z', 'D', 'P', 'Q', 't',
];

/// Long flags that consume the following token
const LONG_FLAGS_WITH_ARGS: &[&str] = &[
    "--request", "--header", "--data", "--data-raw", "--data-binary", "--data-ascii",
    "--data-urlencode", "--json", "--user", "--user-agent", "--referer", "--cookie",
    "--cookie-jar", "--proxy", "--proxy-user", "--output", "--max-time",
    "--connect-timeout", "--max-redirs", "--cert", "--key", "--cacert", "--capath",
    "--form", "--form-string", "--url", "--write-out", "--retry", "--retry-delay",
    "--resolve", "--connect-to", "--limit-rate", "--oauth2-bearer", "--upload-file",
    "--config", "--interface", "--range", "--dump-header", "--trace", "--trace-ascii",
    "--unix-socket", "--cert-type", "--key-type", "--ciphers", "--continue-at",
];

/// Flags that carry a request body; only the first one found is honored
const DATA_FLAGS: &[&str] = &[
    "-d", "--data", "--data-raw", "--data-binary", "--data-ascii", "--json",
];

/// A shell word produced by [`tokenize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Whether any part of the word was written inside quotes
    pub quoted: bool,
}

impl Token {
    fn is_flag(&self) -> bool {
        !self.quoted && self.text.len() > 1 && self.text.starts_with('-')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Bare,
    Single,
    Double,
    /// Bash `$'...'` strings, as emitted by browser "copy as cURL"
    AnsiC,
}

/// Split a command line into shell words.
///
/// Single quotes are literal up to the next `'`, so a `\'` inside them does
/// not escape anything. Inside double quotes only `\"` and `\\` are escapes;
/// other backslashes are kept so that continuation sequences survive into
/// the captured value. Outside quotes a backslash-newline joins lines.
/// An unterminated quote runs to the end of the input.
pub fn tokenize(cmd: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_word = false;
    let mut state = QuoteState::Bare;
    let mut chars = cmd.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            QuoteState::Single => {
                if c == '\'' {
                    state = QuoteState::Bare;
                } else {
                    current.push(c);
                }
            }
            QuoteState::Double => match c {
                '"' => state = QuoteState::Bare,
                '\\' if matches!(chars.peek(), Some('"') | Some('\\')) => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                _ => current.push(c),
            },
            QuoteState::AnsiC => match c {
                '\'' => state = QuoteState::Bare,
                '\\' => match chars.next() {
                    Some('n') => current.push('\n'),
                    Some('t') => current.push('\t'),
                    Some('r') => current.push('\r'),
                    Some(other) => current.push(other),
                    None => {}
                },
                _ => current.push(c),
            },
            QuoteState::Bare => match c {
                '\'' => {
                    state = QuoteState::Single;
                    quoted = true;
                    in_word = true;
                }
                '"' => {
                    state = QuoteState::Double;
                    quoted = true;
                    in_word = true;
                }
                '$' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    state = QuoteState::AnsiC;
                    quoted = true;
                    in_word = true;
                }
                '\\' => match chars.next() {
                    Some('\n') => {}
                    Some('\r') if chars.peek() == Some(&'\n') => {
                        chars.next();
                    }
                    Some(other) => {
                        current.push(other);
                        in_word = true;
                    }
                    None => {}
                },
                c if c.is_whitespace() => {
                    if in_word {
                        tokens.push(Token {
                            text: std::mem::take(&mut current),
                            quoted,
                        });
                        quoted = false;
                        in_word = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if state != QuoteState::Bare {
        debug!("unterminated quote in curl command, keeping remaining text");
    }

    if in_word {
        tokens.push(Token { text: current, quoted });
    }

    tokens
}

/// Parse a curl command string into a canonical request
pub fn parse_curl(cmd: &str) -> CanonicalRequest {
    let tokens = tokenize(cmd.trim());
    parse_tokens(&tokens)
}

/// Everything collected while walking the tokens, before defaults apply
#[derive(Debug, Default)]
struct CurlParts<'a> {
    explicit_method: Option<&'static str>,
    head_only: bool,
    get_mode: bool,
    body: Option<String>,
    user: Option<&'a str>,
    quoted_url: Option<&'a str>,
    bare_url: Option<&'a str>,
    json_flag: bool,
}

/// Split a flag token into the flag and an attached argument, if any
fn split_flag(text: &str) -> (&str, Option<&str>) {
    if text.starts_with("--") {
        return (text, None);
    }
    let mut chars = text[1..].chars();
    match chars.next() {
        Some(c) if SHORT_FLAGS_WITH_ARGS.contains(&c) && text.len() > 2 => {
            let split = 1 + c.len_utf8();
            (&text[..split], Some(&text[split..]))
        }
        _ => (text, None),
    }
}

fn is_cluster(text: &str) -> bool {
    !text.starts_with("--")
        && text.len() > 2
        && text[1..].chars().all(|c| FLAGS_WITHOUT_ARGS.contains(&c))
}

fn takes_argument(flag: &str) -> bool {
    if flag.starts_with("--") {
        return LONG_FLAGS_WITH_ARGS.contains(&flag);
    }
    let mut chars = flag[1..].chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if SHORT_FLAGS_WITH_ARGS.contains(&c))
}

fn looks_like_url(text: &str) -> bool {
    let lower = text.trim_start().to_ascii_lowercase();
    URL_PREFIXES.iter().any(|p| lower.starts_with(p))
}

fn parse_tokens(tokens: &[Token]) -> CanonicalRequest {
    let mut req = CanonicalRequest::default();
    let mut parts = CurlParts::default();
    let mut i = 0;

    if tokens
        .first()
        .map(|t| !t.quoted && t.text.eq_ignore_ascii_case("curl"))
        .unwrap_or(false)
    {
        i = 1;
    }

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;

        if !token.is_flag() {
            record_url_candidate(&mut parts, token);
            continue;
        }

        if is_cluster(&token.text) {
            for c in token.text[1..].chars() {
                match c {
                    'I' => parts.head_only = true,
                    'G' => parts.get_mode = true,
                    _ => {}
                }
            }
            continue;
        }

        let (flag, attached) = split_flag(&token.text);
        let value = match attached {
            Some(v) => Some(v),
            None if takes_argument(flag) => {
                let next = tokens.get(i).map(|t| t.text.as_str());
                if next.is_some() {
                    i += 1;
                }
                next
            }
            None => None,
        };

        apply_flag(&mut req, &mut parts, flag, value);
    }

    finish(req, parts)
}

fn record_url_candidate<'a>(parts: &mut CurlParts<'a>, token: &'a Token) {
    if !looks_like_url(&token.text) {
        return;
    }
    if token.quoted {
        parts.quoted_url.get_or_insert(token.text.as_str());
    } else {
        parts.bare_url.get_or_insert(token.text.as_str());
    }
}

fn apply_flag<'a>(
    req: &mut CanonicalRequest,
    parts: &mut CurlParts<'a>,
    flag: &str,
    value: Option<&'a str>,
) {
    match flag {
        "-X" | "--request" => match value.and_then(http::normalize) {
            Some(method) => parts.explicit_method = Some(method),
            None => debug!(value = ?value, "ignoring unrecognized method override"),
        },
        "-H" | "--header" => {
            if let Some(raw) = value {
                match raw.split_once(':') {
                    Some((key, val)) if req.insert_header(key, val) => {}
                    _ => debug!(header = raw, "dropping malformed header"),
                }
            }
        }
        f if DATA_FLAGS.contains(&f) => {
            if f == "--json" {
                parts.json_flag = true;
            }
            if parts.body.is_some() {
                debug!(flag = f, "ignoring additional data flag");
            } else if let Some(data) = value {
                parts.body = Some(clean_body(data));
            }
        }
        "-u" | "--user" => parts.user = value,
        "-A" | "--user-agent" => {
            if let Some(v) = value {
                req.insert_header("User-Agent", v);
            }
        }
        "-e" | "--referer" => {
            if let Some(v) = value {
                req.insert_header("Referer", v);
            }
        }
        "-b" | "--cookie" => {
            // A value without '=' names a cookie file, not a cookie
            if let Some(v) = value.filter(|v| v.contains('=')) {
                req.insert_header("Cookie", v);
            }
        }
        "--oauth2-bearer" => {
            if let Some(token) = value {
                req.insert_header("Authorization", &format!("Bearer {}", token.trim()));
            }
        }
        "--url" => {
            if let Some(url) = value.filter(|v| looks_like_url(v)) {
                parts.quoted_url.get_or_insert(url);
            }
        }
        "-I" | "--head" => parts.head_only = true,
        "-G" | "--get" => parts.get_mode = true,
        "-L" | "--location" | "--location-trusted" => {}
        _ => {}
    }
}

/// Remove line continuations from a captured body and trim it
fn clean_body(data: &str) -> String {
    LINE_CONTINUATION.replace_all(data, "").trim().to_string()
}

fn finish(mut req: CanonicalRequest, parts: CurlParts<'_>) -> CanonicalRequest {
    req.url = parts
        .quoted_url
        .or(parts.bare_url)
        .unwrap_or_default()
        .to_string();

    if let Some(user) = parts.user {
        if req.header("Authorization").is_none() {
            let credentials = if user.contains(':') {
                user.to_string()
            } else {
                format!("{}:", user)
            };
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            req.insert_header("Authorization", &format!("Basic {}", encoded));
        }
    }

    if parts.json_flag {
        if req.header("Content-Type").is_none() {
            req.insert_header("Content-Type", "application/json");
        }
        if req.header("Accept").is_none() {
            req.insert_header("Accept", "application/json");
        }
    }

    let mut body = parts.body;
    if parts.get_mode {
        if let Some(query) = body.take().filter(|b| !b.is_empty()) {
            let separator = if req.url.contains('?') { '&' } else { '?' };
            req.url = format!("{}{}{}", req.url, separator, query);
        }
    }

    let method = match (parts.explicit_method, parts.head_only, parts.get_mode) {
        (Some(method), _, _) => method,
        (None, true, _) => http::HEAD,
        (None, false, true) => http::GET,
        (None, false, false) => http::infer(body.is_some()),
    };
    req.method = method.to_string();
    req.body = body.unwrap_or_default();

    req
}
