//! Common test utilities for reqstash integration tests
//!
//! Every invocation runs against a private temporary config directory so
//! the developer's own config and store are never touched.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated environment for one CLI invocation
pub struct MockEnvironment {
    /// Temporary config directory
    pub config_dir: TempDir,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self { config_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }

    /// Write `config.toml` into the config directory
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_dir.path().join("config.toml"), content)
            .expect("Failed to write config");
    }

    /// Write a file into the config directory and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.config_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Path of the default store file
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.path().join("requests.json")
    }

    /// Build a reqstash command bound to this environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("reqstash").expect("binary should build");
        cmd.env("REQSTASH_CONFIG_DIR", self.config_path())
            .env_remove("REQSTASH_STORE")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Run reqstash and parse stdout as JSON, asserting success
pub fn json_output(env: &MockEnvironment, args: &[&str]) -> serde_json::Value {
    let output = env.cmd().args(args).output().expect("Failed to run reqstash");
    assert!(
        output.status.success(),
        "reqstash failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Read the store file written by `--save`
pub fn read_store(path: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(path).expect("store file should exist");
    serde_json::from_str(&content).expect("store should be a JSON array")
}

/// A collection exercising folders, disabled headers and body modes
pub const SAMPLE_COLLECTION: &str = r#"{
  "info": {
    "name": "Sample API",
    "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
  },
  "item": [
    {
      "name": "Users",
      "item": [
        {
          "name": "List users",
          "request": {
            "method": "GET",
            "url": {"raw": "https://api.example.com/users?page=1"},
            "header": [
              {"key": "Accept", "value": "application/json"},
              {"key": "X-Debug", "value": "1", "disabled": true}
            ]
          }
        },
        {
          "name": "Admin",
          "item": [
            {
              "name": "Create user",
              "request": {
                "method": "post",
                "url": "https://api.example.com/users",
                "body": {"mode": "raw", "raw": "{\"name\":\"a\"}"}
              }
            }
          ]
        }
      ]
    },
    {
      "name": "Upload avatar",
      "request": {
        "method": "POST",
        "url": "https://api.example.com/avatar",
        "body": {"mode": "formdata", "formdata": [
          {"key": "user", "value": "42"},
          {"key": "file", "type": "file", "src": "/tmp/a.png"}
        ]}
      }
    },
    {
      "name": "Health",
      "request": {"url": ""}
    }
  ]
}"#;
