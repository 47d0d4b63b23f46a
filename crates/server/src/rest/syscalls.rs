use axum::extract::State;
use axum::Json;

use warden_common::api::CallableSyscallsResponse;

use crate::error::ApiError;
use crate::rest::AppState;

pub async fn callable_syscalls(
    State(state): State<AppState>,
) -> Result<Json<CallableSyscallsResponse>, ApiError> {
    let resp = state.syscalls.callable_syscalls().await?;
    Ok(Json(resp))
}
