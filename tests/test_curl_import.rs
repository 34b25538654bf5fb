//! Integration tests for cURL command import

mod common;

use common::{json_output, MockEnvironment};
use predicates::prelude::*;

// =============================================================================
// Curl Import - Canonical Output
// =============================================================================

#[test]
fn test_curl_import_full_example() {
    let env = MockEnvironment::new();
    let json = json_output(
        &env,
        &[
            "curl",
            r#"curl -X POST "https://api.example.com/users" -H "Content-Type: application/json" -d '{"name":"a"}'"#,
        ],
    );

    assert_eq!(json["method"], "POST");
    assert_eq!(json["url"], "https://api.example.com/users");
    assert_eq!(json["headers"]["Content-Type"], "application/json");
    assert_eq!(json["body"], r#"{"name":"a"}"#);
    assert_eq!(json["name"], "");
}

#[test]
fn test_curl_import_simple_get() {
    let env = MockEnvironment::new();
    let json = json_output(&env, &["curl", "curl --location 'https://example.com/test'"]);

    assert_eq!(json["method"], "GET");
    assert_eq!(json["url"], "https://example.com/test");
    assert_eq!(json["headers"], serde_json::json!({}));
    assert_eq!(json["body"], "");
}

#[test]
fn test_curl_import_multiline_from_stdin() {
    let env = MockEnvironment::new();
    let cmd = "curl 'https://api.example.com/items' \\\n  -H 'Accept: application/json' \\\n  --data-raw '{\"a\": 1, \\\n    \"b\": 2}'\n";

    let output = env
        .cmd()
        .args(["curl", "-", "--compact"])
        .write_stdin(cmd)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "POST");
    assert_eq!(json["body"], "{\"a\": 1, \"b\": 2}");
    assert_eq!(json["headers"]["Accept"], "application/json");
}

#[test]
fn test_curl_import_without_url_fails() {
    let env = MockEnvironment::new();
    env.cmd()
        .args(["curl", "curl -H 'Accept: */*' example.com"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No URL found"));
}

#[test]
fn test_curl_import_as_curl_output() {
    let env = MockEnvironment::new();
    env.cmd()
        .args(["curl", "curl -X PUT 'https://x.io/a' -H 'A: 1'", "--format", "curl", "--compact"])
        .assert()
        .success()
        .stdout("curl 'https://x.io/a' -X PUT -H 'A: 1'\n");
}

#[test]
fn test_curl_import_save() {
    let env = MockEnvironment::new();
    env.cmd()
        .args(["curl", "curl 'https://x.io/saved'", "--save"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 1 of 1 request(s)"));

    let stored = common::read_store(&env.store_path());
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["url"], "https://x.io/saved");
}
