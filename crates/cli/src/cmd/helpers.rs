use anyhow::{Context, Result};
use std::path::Path;

use warden_common::api::ErrorResponse;
use warden_common::rule_yaml::from_yaml;
use warden_common::RuleSet;

pub const DEFAULT_SERVER: &str = "http://localhost:8080";

pub fn base_url(server: &str) -> String {
    server.trim().trim_end_matches('/').to_string()
}

pub fn api_url(base: &str, path: &str) -> String {
    format!("{base}/api/v1{path}")
}

/// Turns a non-2xx response into an error carrying the server's `error` field.
pub async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    if detail.is_empty() {
        anyhow::bail!("HTTP {status}");
    }
    anyhow::bail!("HTTP {status}: {detail}")
}

/// Reads a rule document. `.json` files, or content opening with `{`, are
/// parsed as JSON; anything else as YAML.
pub fn load_rule_file(path: &Path) -> Result<RuleSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let is_json = path.extension().is_some_and(|e| e == "json")
        || content.trim_start().starts_with('{');

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing {} as JSON", path.display()))
    } else {
        from_yaml(&content).with_context(|| format!("parsing {} as YAML", path.display()))
    }
}

pub fn unquote_etag(raw: &str) -> &str {
    raw.trim().trim_start_matches("W/").trim_matches('"')
}
