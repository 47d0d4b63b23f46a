use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use warden_common::api::{TriggerTestRequest, TriggerTestResponse};

use crate::error::ApiError;
use crate::rest::AppState;

pub async fn trigger_test(
    State(state): State<AppState>,
    payload: Result<Json<TriggerTestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TriggerTestResponse>), ApiError> {
    let Json(req) = payload?;
    if req.test_type.is_empty() {
        return Err(ApiError::Validation("test_type is required".into()));
    }

    let resp = state.trigger.trigger(&req.test_type).await?;
    state.metrics.inc_tests_triggered();
    Ok((StatusCode::ACCEPTED, Json(resp)))
}
