use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use warden_server::config::{LogFormat, ServerConfig};
use warden_server::metrics::ServerMetrics;
use warden_server::rest::{self, AppState};
use warden_server::shutdown::wait_for_shutdown;
use warden_server::store::{
    AlertBuffer, KubeConfigMaps, RedisSyscallSource, RuleStore, SyscallRegistry,
};
use warden_server::trigger::TestTrigger;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_format);

    let config_maps = KubeConfigMaps::connect(&config.kube_config_path, &config.namespace)
        .await
        .map_err(|e| anyhow::anyhow!("failed to build kubernetes client: {e}"))?;
    tracing::info!(
        namespace = %config.namespace,
        config_map = %config.config_map_name,
        "kubernetes client ready"
    );

    let syscall_source = RedisSyscallSource::connect(
        &config.redis_addr,
        &config.redis_password,
        &config.syscall_set_key,
    )
    .await
    .with_context(|| format!("failed to connect to CCSL Redis at {}", config.redis_addr))?;
    syscall_source
        .ping()
        .await
        .with_context(|| format!("CCSL Redis at {} did not answer PING", config.redis_addr))?;
    tracing::info!(addr = %config.redis_addr, "connected to CCSL Redis");

    let trigger = TestTrigger::new(config.attacker_base_url.clone(), config.attack_timeout)
        .context("failed to build attacker HTTP client")?;

    let state = AppState {
        rules: RuleStore::new(
            Arc::new(config_maps),
            config.config_map_name.clone(),
            config.rule_yaml_key.clone(),
            config.upstream_timeout,
        ),
        syscalls: SyscallRegistry::new(Arc::new(syscall_source), config.upstream_timeout),
        alerts: AlertBuffer::new(),
        trigger,
        metrics: ServerMetrics::new(),
    };
    let app = rest::router(state);

    let rest_addr = config.rest_addr;
    let listener = tokio::net::TcpListener::bind(rest_addr)
        .await
        .with_context(|| format!("failed to bind {rest_addr}"))?;
    tracing::info!(%rest_addr, "REST server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("REST server failed")?;

    tracing::info!("REST server stopped");
    Ok(())
}
