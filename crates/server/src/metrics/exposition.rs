use super::server_metrics::ServerMetrics;

pub fn render_prometheus(m: &ServerMetrics) -> String {
    let mut out = String::with_capacity(1024);

    write_counter(&mut out, "warden_rest_requests_total", m.rest_requests_total());
    write_counter(&mut out, "warden_rest_client_errors_total", m.rest_client_errors_total());
    write_counter(&mut out, "warden_rest_server_errors_total", m.rest_server_errors_total());
    write_counter(&mut out, "warden_rule_reads_total", m.rule_reads_total());
    write_counter(&mut out, "warden_rule_updates_total", m.rule_updates_total());
    write_counter(&mut out, "warden_alerts_received_total", m.alerts_received_total());
    write_counter(&mut out, "warden_tests_triggered_total", m.tests_triggered_total());

    let (sum, count) = m.rest_latency_vals();
    write_summary(&mut out, "warden_rest_latency_us", sum, count);

    out
}

fn write_counter(out: &mut String, name: &str, val: u64) {
    use std::fmt::Write;
    let _ = writeln!(out, "# TYPE {name} counter");
    let _ = writeln!(out, "{name} {val}");
}

fn write_summary(out: &mut String, name: &str, sum: u64, count: u64) {
    use std::fmt::Write;
    let _ = writeln!(out, "# TYPE {name} summary");
    let _ = writeln!(out, "{name}_sum {sum}");
    let _ = writeln!(out, "{name}_count {count}");
}
