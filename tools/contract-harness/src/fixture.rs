//! Golden fixture format and directory loader.
//!
//! Each fixture file at `contracts/http/{service}/{id}.json` describes one
//! HTTP assertion: the request to send and the expected response.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One HTTP assertion, deserialized from its fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Service the assertion belongs to (`auth`).
    pub service: String,
    /// Filename stem; unique within the service and used for run ordering.
    pub id: String,
    /// One line of context printed next to the PASS/FAIL verdict.
    pub description: String,
    pub request: Request,
    pub expect: Expect,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expect {
    /// Expected HTTP status code.
    pub status: u16,
    /// Headers the response must carry; anything extra is allowed.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Expected response body (exact JSON match when present).
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

/// Load every fixture under `{workspace_root}/contracts/http/{service}/`,
/// sorted by id so runs are deterministic.
pub fn load_service(workspace_root: &Path, service: &str) -> Result<Vec<Fixture>> {
    let dir = workspace_root.join("contracts/http").join(service);

    let mut fixtures = Vec::new();
    for entry in fs::read_dir(&dir)
        .with_context(|| format!("cannot open {}", dir.display()))?
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let fixture: Fixture = serde_json::from_str(&content)
                .with_context(|| format!("invalid fixture JSON in {}", path.display()))?;
            fixtures.push(fixture);
        }
    }

    fixtures.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(fixtures)
}
