use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub alert_id: String,
    /// RFC3339, as sent by the detection pipeline. Not validated on receipt.
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub rule_id: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub rule_description: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub severity: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub pod_name: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub namespace: String,
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub syscall_log: HashMap<String, serde_json::Value>,
}

/// Body posted by the rule engine. Same shape as a stored alert.
pub type WebhookAlert = Alert;
