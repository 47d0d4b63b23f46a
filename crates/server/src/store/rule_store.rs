use std::sync::Arc;
use std::time::Duration;

use warden_common::rule_yaml::{from_yaml, to_yaml};
use warden_common::validate::unknown_operators;
use warden_common::RuleSet;

use super::config_map::ConfigMapSource;
use super::error::{bounded, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct VersionedRuleSet {
    pub rule_set: RuleSet,
    /// Resource version of the ConfigMap the rules were read from.
    pub etag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// The `ruleset_version` that was written, echoed from the input.
    pub new_version: String,
    pub etag: Option<String>,
}

/// The rule document kept under one key of one ConfigMap.
///
/// Nothing is cached: every call goes to the source.
#[derive(Clone)]
pub struct RuleStore {
    source: Arc<dyn ConfigMapSource>,
    config_map: String,
    key: String,
    timeout: Duration,
}

impl RuleStore {
    pub fn new(
        source: Arc<dyn ConfigMapSource>,
        config_map: impl Into<String>,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            config_map: config_map.into(),
            key: key.into(),
            timeout,
        }
    }

    pub async fn get_rules(&self) -> Result<VersionedRuleSet, StoreError> {
        let snapshot = bounded(
            self.timeout,
            "reading config map",
            self.source.get(&self.config_map),
        )
        .await?;

        let doc = snapshot.data.get(&self.key).ok_or_else(|| {
            StoreError::Decode(format!(
                "config map {} has no {} key",
                self.config_map, self.key
            ))
        })?;
        let rule_set = from_yaml(doc).map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::debug!(
            config_map = %self.config_map,
            version = %rule_set.ruleset_version,
            rules = rule_set.rules.len(),
            "rules loaded"
        );
        Ok(VersionedRuleSet {
            rule_set,
            etag: snapshot.resource_version,
        })
    }

    /// Read-modify-write of the rule document.
    ///
    /// `if_match` pins the write to a resource version the caller saw
    /// earlier. Independently of it, the write carries the version read here,
    /// so a writer that slips in between the two legs causes `Conflict`.
    pub async fn update_rules(
        &self,
        rule_set: &RuleSet,
        if_match: Option<&str>,
    ) -> Result<UpdateOutcome, StoreError> {
        let doc = to_yaml(rule_set).map_err(|e| StoreError::Decode(e.to_string()))?;
        tracing::debug!(yaml = %doc, "rule document to be written");
        for (rule_id, operator) in unknown_operators(rule_set) {
            tracing::warn!(
                %rule_id,
                %operator,
                "writing rule with an operator the engine does not know"
            );
        }

        let current = bounded(
            self.timeout,
            "reading config map",
            self.source.get(&self.config_map),
        )
        .await?;

        if let Some(expected) = if_match {
            if current.resource_version.as_deref() != Some(expected) {
                return Err(StoreError::Conflict(format!(
                    "rules were modified since version {expected}"
                )));
            }
        }

        let etag = bounded(
            self.timeout,
            "writing config map",
            self.source.update_key(
                &self.config_map,
                &self.key,
                doc,
                current.resource_version.as_deref(),
            ),
        )
        .await?;

        tracing::info!(
            config_map = %self.config_map,
            version = %rule_set.ruleset_version,
            "rules updated"
        );
        Ok(UpdateOutcome {
            new_version: rule_set.ruleset_version.clone(),
            etag,
        })
    }
}
