use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub rest_addr: SocketAddr,
    /// Empty means infer: in-cluster service account first, then `~/.kube/config`.
    pub kube_config_path: String,
    pub namespace: String,
    pub config_map_name: String,
    pub rule_yaml_key: String,
    pub redis_addr: String,
    pub redis_password: String,
    pub syscall_set_key: String,
    pub attacker_base_url: String,
    pub attack_timeout: Duration,
    pub upstream_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rest_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            kube_config_path: String::new(),
            namespace: "default".into(),
            config_map_name: "rule-yaml".into(),
            rule_yaml_key: "rule.yaml".into(),
            redis_addr: "redis-ccsl-svc:6379".into(),
            redis_password: String::new(),
            syscall_set_key: "cluster_syscalls".into(),
            attacker_base_url: "http://attacker-service:80".into(),
            attack_timeout: Duration::from_secs(10),
            upstream_timeout: Duration::from_secs(5),
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = parse_or(get("PORT"), "PORT", defaults.rest_addr.port());
        let attack_secs = parse_or(
            get("ATTACK_TIMEOUT_SECS"),
            "ATTACK_TIMEOUT_SECS",
            defaults.attack_timeout.as_secs(),
        );
        let upstream_secs = parse_or(
            get("UPSTREAM_TIMEOUT_SECS"),
            "UPSTREAM_TIMEOUT_SECS",
            defaults.upstream_timeout.as_secs(),
        );
        let log_format = match get("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            rest_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            kube_config_path: get("KUBE_CONFIG_PATH").unwrap_or(defaults.kube_config_path),
            namespace: get("NAMESPACE").unwrap_or(defaults.namespace),
            config_map_name: get("CONFIG_MAP_NAME").unwrap_or(defaults.config_map_name),
            rule_yaml_key: get("RULE_YAML_KEY").unwrap_or(defaults.rule_yaml_key),
            redis_addr: get("CCSL_REDIS_ADDR").unwrap_or(defaults.redis_addr),
            redis_password: get("CCSL_REDIS_PASSWORD").unwrap_or(defaults.redis_password),
            syscall_set_key: get("SYSCALL_SET_KEY").unwrap_or(defaults.syscall_set_key),
            attacker_base_url: get("ATTACKER_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.attacker_base_url),
            attack_timeout: Duration::from_secs(attack_secs),
            upstream_timeout: Duration::from_secs(upstream_secs),
            log_format,
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    raw: Option<String>,
    key: &str,
    default: T,
) -> T {
    match raw {
        None => default,
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, %default, "invalid value, using default");
            default
        }),
    }
}
