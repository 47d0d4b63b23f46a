mod attack;
mod client;

pub use attack::{AttackKind, DEFAULT_ATTACK_PATH};
pub use client::{TestTrigger, TriggerError};
