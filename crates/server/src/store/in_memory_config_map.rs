use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::config_map::{ConfigMapSnapshot, ConfigMapSource};
use super::error::StoreError;

struct Entry {
    data: BTreeMap<String, String>,
    version: u64,
}

/// Process-local stand-in for the cluster API, used by tests and local runs.
#[derive(Clone)]
pub struct InMemoryConfigMaps {
    maps: Arc<DashMap<String, Entry>>,
    next_version: Arc<AtomicU64>,
    unavailable: Arc<AtomicBool>,
}

impl Default for InMemoryConfigMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConfigMaps {
    pub fn new() -> Self {
        Self {
            maps: Arc::new(DashMap::new()),
            next_version: Arc::new(AtomicU64::new(1)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn insert(&self, name: &str, data: BTreeMap<String, String>) -> String {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        self.maps.insert(name.to_string(), Entry { data, version });
        version.to_string()
    }

    pub fn data(&self, name: &str) -> Option<BTreeMap<String, String>> {
        self.maps.get(name).map(|e| e.data.clone())
    }

    /// Makes every call fail as if the API server were unreachable.
    pub fn set_unavailable(&self, v: bool) {
        self.unavailable.store(v, Ordering::Relaxed);
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

fn not_found(name: &str) -> StoreError {
    StoreError::Upstream(format!("configmaps \"{name}\" not found (HTTP 404)"))
}

#[async_trait::async_trait]
impl ConfigMapSource for InMemoryConfigMaps {
    async fn get(&self, name: &str) -> Result<ConfigMapSnapshot, StoreError> {
        self.check_reachable()?;
        let entry = self.maps.get(name).ok_or_else(|| not_found(name))?;
        Ok(ConfigMapSnapshot {
            data: entry.data.clone(),
            resource_version: Some(entry.version.to_string()),
        })
    }

    async fn update_key(
        &self,
        name: &str,
        key: &str,
        value: String,
        resource_version: Option<&str>,
    ) -> Result<Option<String>, StoreError> {
        self.check_reachable()?;
        let mut entry = self.maps.get_mut(name).ok_or_else(|| not_found(name))?;
        if let Some(expected) = resource_version {
            if expected != entry.version.to_string() {
                return Err(StoreError::Conflict(format!(
                    "configmaps \"{name}\" was modified (have {expected}, current {})",
                    entry.version
                )));
            }
        }
        entry.data.insert(key.to_string(), value);
        entry.version = self.next_version.fetch_add(1, Ordering::Relaxed);
        Ok(Some(entry.version.to_string()))
    }
}
