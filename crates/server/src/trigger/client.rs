use reqwest::{Client, StatusCode};
use std::time::Duration;

use warden_common::api::TriggerTestResponse;

use super::attack::{AttackKind, DEFAULT_ATTACK_PATH};

#[derive(Debug)]
pub enum TriggerError {
    Unavailable(String),
    Upstream(StatusCode),
}

impl std::fmt::Display for TriggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "attacker service unreachable: {msg}"),
            Self::Upstream(status) => {
                write!(f, "attacker service returned status: {}", status.as_u16())
            }
        }
    }
}

impl std::error::Error for TriggerError {}

/// Fires synthetic attacks at the attacker service. One GET per trigger;
/// nothing is tracked after the response.
#[derive(Clone)]
pub struct TestTrigger {
    base_url: String,
    client: Client,
}

impl TestTrigger {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn url_for(&self, kind: &AttackKind) -> String {
        let path = match kind.path() {
            Some(path) => path,
            None => DEFAULT_ATTACK_PATH,
        };
        format!("{}{}", self.base_url, path)
    }

    pub async fn trigger(&self, test_type: &str) -> Result<TriggerTestResponse, TriggerError> {
        let kind = AttackKind::parse(test_type);
        if let AttackKind::Unknown(raw) = &kind {
            tracing::warn!(
                test_type = %raw,
                path = DEFAULT_ATTACK_PATH,
                "no dedicated attack for test type, using default"
            );
        }
        let url = self.url_for(&kind);
        tracing::info!(%test_type, %url, "triggering attack test");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriggerError::Unavailable(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%status, %body, "attacker service responded");

        if status != StatusCode::OK {
            tracing::error!(%test_type, status = status.as_u16(), "attacker service rejected test");
            return Err(TriggerError::Upstream(status));
        }

        Ok(TriggerTestResponse {
            status: "test_triggered".into(),
            job_name: format!("http-trigger-{test_type}"),
        })
    }
}
