use serde::{Deserialize, Serialize};

/// Placeholder used until argument metadata is sourced from a syscall table.
pub const UNKNOWN_DESCRIPTION: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyscallArg {
    #[serde(rename = "type")]
    pub arg_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syscall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<SyscallArg>,
    #[serde(default)]
    pub description: String,
}

impl Syscall {
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            description: UNKNOWN_DESCRIPTION.to_string(),
        }
    }
}
