use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::Json;

use warden_common::api::UpdateRulesResponse;
use warden_common::RuleSet;

use crate::error::ApiError;
use crate::rest::AppState;
use crate::store::validate_rules;

fn etag_headers(etag: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(v) = etag.and_then(|e| HeaderValue::from_str(&format!("\"{e}\"")).ok()) {
        headers.insert(header::ETAG, v);
    }
    headers
}

/// `If-Match` value without quotes or weak prefix. `*` means no precondition.
fn if_match(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::IF_MATCH)?.to_str().ok()?.trim();
    if raw.is_empty() || raw == "*" {
        return None;
    }
    let raw = raw.strip_prefix("W/").unwrap_or(raw);
    Some(raw.trim_matches('"').to_string())
}

pub async fn get_rules(State(state): State<AppState>) -> Result<(HeaderMap, Json<RuleSet>), ApiError> {
    state.metrics.inc_rule_reads();
    let versioned = state.rules.get_rules().await?;
    Ok((etag_headers(versioned.etag.as_deref()), Json(versioned.rule_set)))
}

pub async fn update_rules(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RuleSet>, JsonRejection>,
) -> Result<(HeaderMap, Json<UpdateRulesResponse>), ApiError> {
    let Json(rule_set) = payload?;
    validate_rules(&rule_set).map_err(ApiError::Validation)?;

    let expected = if_match(&headers);
    let outcome = state
        .rules
        .update_rules(&rule_set, expected.as_deref())
        .await?;
    state.metrics.inc_rule_updates();

    let body = UpdateRulesResponse {
        status: "success".into(),
        message: "Rule.yaml ConfigMap updated successfully.".into(),
        new_version: outcome.new_version,
    };
    Ok((etag_headers(outcome.etag.as_deref()), Json(body)))
}
