use axum::http::StatusCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct ServerMetrics {
    rest_requests_total: AtomicU64,
    rest_client_errors_total: AtomicU64,
    rest_server_errors_total: AtomicU64,
    rule_reads_total: AtomicU64,
    rule_updates_total: AtomicU64,
    alerts_received_total: AtomicU64,
    tests_triggered_total: AtomicU64,
    rest_latency_sum_us: AtomicU64,
    rest_latency_count: AtomicU64,
}

impl ServerMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_rest_requests(&self) {
        self.rest_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_status(&self, status: StatusCode) {
        if status.is_client_error() {
            self.rest_client_errors_total.fetch_add(1, Ordering::Relaxed);
        } else if status.is_server_error() {
            self.rest_server_errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_rule_reads(&self) {
        self.rule_reads_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rule_updates(&self) {
        self.rule_updates_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_alerts_received(&self) {
        self.alerts_received_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tests_triggered(&self) {
        self.tests_triggered_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rest_latency(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.rest_latency_sum_us.fetch_add(us, Ordering::Relaxed);
        self.rest_latency_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rest_requests_total(&self) -> u64 {
        self.rest_requests_total.load(Ordering::Relaxed)
    }

    pub fn rest_client_errors_total(&self) -> u64 {
        self.rest_client_errors_total.load(Ordering::Relaxed)
    }

    pub fn rest_server_errors_total(&self) -> u64 {
        self.rest_server_errors_total.load(Ordering::Relaxed)
    }

    pub fn rule_reads_total(&self) -> u64 {
        self.rule_reads_total.load(Ordering::Relaxed)
    }

    pub fn rule_updates_total(&self) -> u64 {
        self.rule_updates_total.load(Ordering::Relaxed)
    }

    pub fn alerts_received_total(&self) -> u64 {
        self.alerts_received_total.load(Ordering::Relaxed)
    }

    pub fn tests_triggered_total(&self) -> u64 {
        self.tests_triggered_total.load(Ordering::Relaxed)
    }

    pub fn rest_latency_vals(&self) -> (u64, u64) {
        (
            self.rest_latency_sum_us.load(Ordering::Relaxed),
            self.rest_latency_count.load(Ordering::Relaxed),
        )
    }
}
