use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use warden_server::metrics::ServerMetrics;
use warden_server::rest::{router, AppState};
use warden_server::store::{
    AlertBuffer, InMemoryConfigMaps, InMemorySyscallSource, RuleStore, SyscallRegistry,
};
use warden_server::trigger::TestTrigger;

const RULE_DOC: &str = r#"ruleset_version: "1.0"
description: baseline
rules:
  - rule_id: R1
    description: no shadow reads
    conditions:
      - field: path
        operator: contains_any
        value: ["/etc/shadow"]
"#;

struct Fixture {
    maps: InMemoryConfigMaps,
    syscalls: InMemorySyscallSource,
    state: AppState,
}

fn fixture_with_attacker(base_url: &str) -> Fixture {
    let maps = InMemoryConfigMaps::new();
    let mut data = BTreeMap::new();
    data.insert("rule.yaml".to_string(), RULE_DOC.to_string());
    maps.insert("rule-yaml", data);

    let syscalls = InMemorySyscallSource::new(["openat", "read"]);

    let state = AppState {
        rules: RuleStore::new(
            Arc::new(maps.clone()),
            "rule-yaml",
            "rule.yaml",
            Duration::from_secs(1),
        ),
        syscalls: SyscallRegistry::new(Arc::new(syscalls.clone()), Duration::from_secs(1)),
        alerts: AlertBuffer::new(),
        trigger: TestTrigger::new(base_url, Duration::from_millis(500)).unwrap(),
        metrics: ServerMetrics::new(),
    };
    Fixture {
        maps,
        syscalls,
        state,
    }
}

fn fixture() -> Fixture {
    // Nothing listens on port 1.
    fixture_with_attacker("http://127.0.0.1:1")
}

async fn send(state: &AppState, req: Request<Body>) -> Response {
    router(state.clone()).oneshot(req).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn valid_rules(version: &str) -> serde_json::Value {
    serde_json::json!({
        "ruleset_version": version,
        "description": "updated",
        "rules": [{
            "rule_id": "R2",
            "description": "no passwd writes",
            "conditions": [{
                "field": "path",
                "operator": "starts_with_any",
                "value": ["/etc/passwd"]
            }]
        }]
    })
}

fn alert(id: &str, ts: &str) -> serde_json::Value {
    serde_json::json!({
        "alert_id": id,
        "timestamp": ts,
        "rule_id": "R1",
        "rule_description": "no shadow reads",
        "pod_name": "web-0",
        "namespace": "default",
        "syscall_log": {"syscall": "openat", "path": "/etc/shadow"}
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let f = fixture();
    let resp = send(&f.state, get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn get_rules_returns_document_and_etag() {
    let f = fixture();
    let resp = send(&f.state, get("/api/v1/rules")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ETAG));

    let v = body_json(resp).await;
    assert_eq!(v["ruleset_version"], "1.0");
    assert_eq!(v["rules"][0]["rule_id"], "R1");
    assert_eq!(v["rules"][0]["conditions"][0]["operator"], "contains_any");
}

#[tokio::test]
async fn put_rules_without_version_is_rejected() {
    let f = fixture();
    let mut body = valid_rules("2.0");
    body["ruleset_version"] = serde_json::json!("");

    let resp = send(&f.state, json(Method::PUT, "/api/v1/rules", body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "ruleset_version is required");

    let stored = f.maps.data("rule-yaml").unwrap();
    assert_eq!(stored["rule.yaml"], RULE_DOC);
}

#[tokio::test]
async fn put_rules_missing_version_key_is_rejected() {
    let f = fixture();
    let mut body = valid_rules("2.0");
    body.as_object_mut().unwrap().remove("ruleset_version");

    let resp = send(&f.state, json(Method::PUT, "/api/v1/rules", body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "ruleset_version is required");
    assert_eq!(f.maps.data("rule-yaml").unwrap()["rule.yaml"], RULE_DOC);
}

#[tokio::test]
async fn put_rules_null_fields_hit_validation() {
    let f = fixture();
    let mut body = valid_rules("2.0");
    body["ruleset_version"] = serde_json::Value::Null;
    let resp = send(&f.state, json(Method::PUT, "/api/v1/rules", body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "ruleset_version is required");

    let mut body = valid_rules("2.0");
    body["rules"] = serde_json::Value::Null;
    let resp = send(&f.state, json(Method::PUT, "/api/v1/rules", body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "at least one rule is required");
}

#[tokio::test]
async fn put_rules_with_empty_conditions_names_the_rule() {
    let f = fixture();
    let mut body = valid_rules("2.0");
    body["rules"][0]["conditions"] = serde_json::json!([]);

    let resp = send(&f.state, json(Method::PUT, "/api/v1/rules", body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "at least one condition is required for rule R2"
    );
}

#[tokio::test]
async fn put_then_get_round_trips() {
    let f = fixture();
    let resp = send(&f.state, json(Method::PUT, "/api/v1/rules", valid_rules("2.0"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["status"], "success");
    assert_eq!(v["message"], "Rule.yaml ConfigMap updated successfully.");
    assert_eq!(v["new_version"], "2.0");

    let v = body_json(send(&f.state, get("/api/v1/rules")).await).await;
    assert_eq!(v["ruleset_version"], "2.0");
    assert_eq!(v["rules"][0]["rule_id"], "R2");
    assert_eq!(v["rules"][0]["conditions"][0]["value"][0], "/etc/passwd");
}

#[tokio::test]
async fn stale_if_match_conflicts() {
    let f = fixture();
    let etag = send(&f.state, get("/api/v1/rules"))
        .await
        .headers()
        .get(header::ETAG)
        .unwrap()
        .clone();

    let first = send(&f.state, json(Method::PUT, "/api/v1/rules", valid_rules("2.0"))).await;
    assert_eq!(first.status(), StatusCode::OK);

    let mut req = json(Method::PUT, "/api/v1/rules", valid_rules("3.0"));
    req.headers_mut().insert(header::IF_MATCH, etag);
    let resp = send(&f.state, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(body_json(resp).await["error"].is_string());

    let v = body_json(send(&f.state, get("/api/v1/rules")).await).await;
    assert_eq!(v["ruleset_version"], "2.0");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let f = fixture();
    let req = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/rules")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = send(&f.state, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn rules_upstream_down_is_server_error() {
    let f = fixture();
    f.maps.set_unavailable(true);
    let resp = send(&f.state, get("/api/v1/rules")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn callable_syscalls_lists_set_members() {
    let f = fixture();
    let resp = send(&f.state, get("/api/v1/syscalls/callable")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let v = body_json(resp).await;
    assert_eq!(v["total_count"], 2);
    let mut names: Vec<String> = v["syscalls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["openat", "read"]);
    assert_eq!(v["syscalls"][0]["description"], "TBD");
    assert!(v["syscalls"][0]["args"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn callable_syscalls_empty_set() {
    let f = fixture();
    f.syscalls.set_members(Vec::new()).await;
    let v = body_json(send(&f.state, get("/api/v1/syscalls/callable")).await).await;
    assert_eq!(v["total_count"], 0);
    assert!(v["syscalls"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn callable_syscalls_redis_down() {
    let f = fixture();
    f.syscalls.set_unavailable(true);
    let resp = send(&f.state, get("/api/v1/syscalls/callable")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn webhook_then_list_alerts() {
    let f = fixture();
    let resp = send(
        &f.state,
        json(
            Method::POST,
            "/api/v1/alerts/webhook",
            alert("a1", "2024-01-01T00:00:00Z"),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "received");

    let v = body_json(send(&f.state, get("/api/v1/alerts")).await).await;
    let alerts = v["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["alert_id"], "a1");
    assert_eq!(alerts[0]["syscall_log"]["path"], "/etc/shadow");
}

#[tokio::test]
async fn webhook_accepts_null_syscall_log() {
    let f = fixture();
    let mut body = alert("a-null", "2024-01-01T00:00:00Z");
    body["syscall_log"] = serde_json::Value::Null;

    let resp = send(&f.state, json(Method::POST, "/api/v1/alerts/webhook", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let v = body_json(send(&f.state, get("/api/v1/alerts")).await).await;
    let alerts = v["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["alert_id"], "a-null");
    assert!(alerts[0]["syscall_log"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn list_alerts_honours_limit_and_since() {
    let f = fixture();
    for (id, ts) in [
        ("a1", "2024-01-01T00:00:00Z"),
        ("a2", "2024-01-02T00:00:00Z"),
        ("a3", "2024-01-03T00:00:00Z"),
    ] {
        send(
            &f.state,
            json(Method::POST, "/api/v1/alerts/webhook", alert(id, ts)),
        )
        .await;
    }

    let v = body_json(send(&f.state, get("/api/v1/alerts?limit=2")).await).await;
    let ids: Vec<&str> = v["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["alert_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a3", "a2"]);

    let v = body_json(
        send(
            &f.state,
            get("/api/v1/alerts?since=2024-01-01T12:00:00Z"),
        )
        .await,
    )
    .await;
    assert_eq!(v["alerts"].as_array().unwrap().len(), 2);

    let v = body_json(send(&f.state, get("/api/v1/alerts?limit=bogus&since=yesterday")).await).await;
    assert_eq!(v["alerts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn trigger_requires_test_type() {
    let f = fixture();
    let resp = send(
        &f.state,
        json(
            Method::POST,
            "/api/v1/tests/trigger",
            serde_json::json!({"test_type": ""}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "test_type is required");
}

#[tokio::test]
async fn trigger_null_test_type_is_required() {
    let f = fixture();
    let resp = send(
        &f.state,
        json(
            Method::POST,
            "/api/v1/tests/trigger",
            serde_json::json!({"test_type": null}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "test_type is required");
}

#[tokio::test]
async fn trigger_with_attacker_down_is_server_error() {
    let f = fixture();
    let resp = send(
        &f.state,
        json(
            Method::POST,
            "/api/v1/tests/trigger",
            serde_json::json!({"test_type": "RULE_A01_HOST_CRITICAL_WRITE"}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn trigger_hits_attacker_and_accepts() {
    let attacker = axum::Router::new().route(
        "/attack/write",
        axum::routing::get(|| async { "attack launched" }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, attacker).await.unwrap();
    });

    let f = fixture_with_attacker(&format!("http://{addr}"));
    let resp = send(
        &f.state,
        json(
            Method::POST,
            "/api/v1/tests/trigger",
            serde_json::json!({"test_type": "RULE_A01_HOST_CRITICAL_WRITE"}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let v = body_json(resp).await;
    assert_eq!(v["status"], "test_triggered");
    assert_eq!(v["job_name"], "http-trigger-RULE_A01_HOST_CRITICAL_WRITE");
    assert_eq!(f.state.metrics.tests_triggered_total(), 1);
}

#[tokio::test]
async fn preflight_short_circuits() {
    let f = fixture();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/rules")
        .body(Body::empty())
        .unwrap();
    let resp = send(&f.state, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(f.state.metrics.rule_reads_total(), 0);
}

#[tokio::test]
async fn cors_headers_on_regular_responses() {
    let f = fixture();
    let resp = send(&f.state, get("/health")).await;
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "POST, OPTIONS, GET, PUT, DELETE"
    );
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn metrics_exposition_counts_requests() {
    let f = fixture();
    send(&f.state, get("/api/v1/rules")).await;
    send(
        &f.state,
        json(
            Method::POST,
            "/api/v1/tests/trigger",
            serde_json::json!({"test_type": ""}),
        ),
    )
    .await;

    let resp = send(&f.state, get("/metrics")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("warden_rule_reads_total 1"));
    assert!(text.contains("warden_rest_client_errors_total 1"));
    assert!(text.contains("warden_rest_latency_us"));
}
