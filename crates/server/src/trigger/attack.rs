/// Path used when a test type has no dedicated attack.
pub const DEFAULT_ATTACK_PATH: &str = "/attack/read";

/// The attack the companion service should run for a rule under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackKind {
    HostCriticalWrite,
    HostAuthRead,
    ContainerEscapePath,
    Unknown(String),
}

impl AttackKind {
    pub fn parse(test_type: &str) -> Self {
        match test_type {
            "RULE_A01_HOST_CRITICAL_WRITE" => Self::HostCriticalWrite,
            "RULE_B02_HOST_AUTH_READ" => Self::HostAuthRead,
            "RULE_C03_CONTAINER_ESCAPE_PATH" => Self::ContainerEscapePath,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// `None` for `Unknown`: the caller picks the fallback.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Self::HostCriticalWrite => Some("/attack/write"),
            Self::HostAuthRead | Self::ContainerEscapePath => Some("/attack/read"),
            Self::Unknown(_) => None,
        }
    }
}
