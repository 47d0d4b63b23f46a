mod alert_buffer;
mod config_map;
mod error;
mod in_memory_config_map;
mod in_memory_syscalls;
mod kube_config_map;
mod redis_syscalls;
mod rule_store;
mod syscall_registry;
mod syscall_source;

pub use alert_buffer::{AlertBuffer, DEFAULT_ALERT_LIMIT};
pub use config_map::{ConfigMapSnapshot, ConfigMapSource};
pub use error::StoreError;
pub use in_memory_config_map::InMemoryConfigMaps;
pub use in_memory_syscalls::InMemorySyscallSource;
pub use kube_config_map::KubeConfigMaps;
pub use redis_syscalls::RedisSyscallSource;
pub use rule_store::{RuleStore, UpdateOutcome, VersionedRuleSet};
pub use syscall_registry::SyscallRegistry;
pub use syscall_source::SyscallSource;
pub use warden_common::validate::validate_rules;
