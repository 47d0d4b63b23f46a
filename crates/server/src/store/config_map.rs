use std::collections::BTreeMap;

use super::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMapSnapshot {
    pub data: BTreeMap<String, String>,
    /// Opaque version token; `None` when the backend does not track one.
    pub resource_version: Option<String>,
}

#[async_trait::async_trait]
pub trait ConfigMapSource: Send + Sync {
    async fn get(&self, name: &str) -> Result<ConfigMapSnapshot, StoreError>;

    /// Sets a single data key, leaving the other keys untouched.
    ///
    /// With `resource_version` set the write only succeeds if the object is
    /// still at that version; otherwise it fails with `StoreError::Conflict`.
    /// Returns the new resource version.
    async fn update_key(
        &self,
        name: &str,
        key: &str,
        value: String,
        resource_version: Option<&str>,
    ) -> Result<Option<String>, StoreError>;
}
