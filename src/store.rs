//! Saved-request persistence boundary
//!
//! The importers never persist anything themselves. A caller hands their
//! output to a [`RequestStore`] through [`save_all`], which records per-item
//! outcomes and never aborts halfway.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::{ReqstashError, Result};
use crate::models::CanonicalRequest;

/// Destination for imported requests
pub trait RequestStore {
    /// Persist one request
    fn save(&mut self, req: &CanonicalRequest) -> Result<()>;
}

/// Per-item outcome of a bulk save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_requests: usize,
    pub saved_requests: usize,
    pub failed_requests: usize,
}

/// Save every request, counting successes and failures
pub fn save_all<S: RequestStore + ?Sized>(store: &mut S, requests: &[CanonicalRequest]) -> ImportSummary {
    let mut summary = ImportSummary {
        total_requests: requests.len(),
        ..ImportSummary::default()
    };

    for req in requests {
        match store.save(req) {
            Ok(()) => summary.saved_requests += 1,
            Err(e) => {
                warn!(name = %req.name, url = %req.url, error = %e, "Failed to save request");
                summary.failed_requests += 1;
            }
        }
    }

    info!(
        total = summary.total_requests,
        saved = summary.saved_requests,
        failed = summary.failed_requests,
        "Saved imported requests"
    );

    summary
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub requests: Vec<CanonicalRequest>,
}

impl RequestStore for MemoryStore {
    fn save(&mut self, req: &CanonicalRequest) -> Result<()> {
        self.requests.push(req.clone());
        Ok(())
    }
}

/// Store backed by a JSON array file
///
/// Every save rewrites the file atomically. Requests without a URL are
/// rejected since nothing usable was extracted for them.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    requests: Vec<CanonicalRequest>,
}

impl JsonFileStore {
    /// Open the store, reading existing entries if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let requests = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    ReqstashError::Store(format!("Invalid store file {}: {}", path.display(), e))
                })?
            }
        } else {
            Vec::new()
        };

        Ok(Self { path, requests })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Requests currently held by the store
    pub fn requests(&self) -> &[CanonicalRequest] {
        &self.requests
    }

    fn persist(&self) -> Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)
            .map_err(|e| ReqstashError::Store(format!("Failed to create store directory: {}", e)))?;

        let content = serde_json::to_string_pretty(&self.requests)?;

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| ReqstashError::Store(format!("Failed to create temp file: {}", e)))?;

        temp.write_all(content.as_bytes())
            .map_err(|e| ReqstashError::Store(format!("Failed to write store: {}", e)))?;

        temp.persist(&self.path)
            .map_err(|e| ReqstashError::Store(format!("Failed to save store: {}", e)))?;

        // Saved requests may carry credentials in their headers
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, permissions);
        }

        Ok(())
    }
}

impl RequestStore for JsonFileStore {
    fn save(&mut self, req: &CanonicalRequest) -> Result<()> {
        if !req.has_url() {
            return Err(ReqstashError::Store(format!(
                "request '{}' has no URL",
                req.name
            )));
        }

        self.requests.push(req.clone());
        if let Err(e) = self.persist() {
            self.requests.pop();
            return Err(e);
        }
        Ok(())
    }
}
