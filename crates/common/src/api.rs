//! Request and response bodies of the admin HTTP API.

use serde::{Deserialize, Serialize};

use crate::alert::Alert;
use crate::syscall::Syscall;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRulesResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub new_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableSyscallsResponse {
    pub total_count: usize,
    pub syscalls: Vec<Syscall>,
}

impl CallableSyscallsResponse {
    pub fn new(syscalls: Vec<Syscall>) -> Self {
        Self {
            total_count: syscalls.len(),
            syscalls,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerTestRequest {
    #[serde(default, deserialize_with = "crate::null_default::or_default")]
    pub test_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerTestResponse {
    pub status: String,
    pub job_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
