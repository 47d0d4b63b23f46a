use anyhow::{Context, Result};

use warden_common::api::StatusResponse;

use crate::output::{print_error, print_json, print_success, OutputMode};
use super::helpers;

pub async fn execute(mode: OutputMode, base: &str) -> Result<()> {
    let health = check_health(&format!("{base}/health")).await;

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "server": base,
            "healthy": health.is_ok(),
        }))?,
        OutputMode::Human => match &health {
            Ok(status) => print_success(&format!("{base}: {status}")),
            Err(e) => print_error(&format!("{base}: {e:#}")),
        },
    }

    health.map(|_| ()).context("health check failed")
}

async fn check_health(url: &str) -> Result<String> {
    let resp = reqwest::get(url).await.context("connection failed")?;
    let status: StatusResponse = helpers::check(resp).await?.json().await?;
    Ok(status.status)
}
