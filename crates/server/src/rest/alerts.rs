use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use warden_common::api::{AlertsResponse, StatusResponse};
use warden_common::WebhookAlert;

use crate::error::ApiError;
use crate::rest::AppState;
use crate::store::DEFAULT_ALERT_LIMIT;

/// Raw strings so a bad value degrades to the default instead of a 400.
#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    pub limit: Option<String>,
    pub since: Option<String>,
}

impl AlertsQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ALERT_LIMIT)
    }

    pub fn since(&self) -> Option<DateTime<Utc>> {
        let raw = self.since.as_deref().filter(|s| !s.is_empty())?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(t) => Some(t.with_timezone(&Utc)),
            Err(e) => {
                tracing::debug!(since = raw, error = %e, "ignoring unparseable since");
                None
            }
        }
    }
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Json<AlertsResponse> {
    let alerts = state.alerts.query(query.limit(), query.since()).await;
    Json(AlertsResponse { alerts })
}

pub async fn receive_webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookAlert>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(alert) = payload?;
    state.alerts.receive(alert).await;
    state.metrics.inc_alerts_received();
    Ok(Json(StatusResponse::new("received")))
}
