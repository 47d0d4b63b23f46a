use axum::Json;

use warden_common::api::StatusResponse;

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::new("ok"))
}
