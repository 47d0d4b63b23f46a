use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::metrics::ServerMetrics;
use crate::middleware::{cors, request_log};
use crate::store::{AlertBuffer, RuleStore, SyscallRegistry};
use crate::trigger::TestTrigger;
use super::{alerts, attack, health, metrics, rules, syscalls};

#[derive(Clone)]
pub struct AppState {
    pub rules: RuleStore,
    pub syscalls: SyscallRegistry,
    pub alerts: AlertBuffer,
    pub trigger: TestTrigger,
    pub metrics: Arc<ServerMetrics>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/rules", get(rules::get_rules).put(rules::update_rules))
        .route("/syscalls/callable", get(syscalls::callable_syscalls))
        .route("/alerts", get(alerts::list_alerts))
        .route("/alerts/webhook", post(alerts::receive_webhook))
        .route("/tests/trigger", post(attack::trigger_test));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health::health))
        .route("/metrics", get(metrics::metrics))
        .layer(axum::middleware::from_fn_with_state(
            state.metrics.clone(),
            request_log,
        ))
        .layer(axum::middleware::from_fn(cors))
        .with_state(state)
}
