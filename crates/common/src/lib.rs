pub mod alert;
pub mod api;
pub mod null_default;
pub mod rule;
pub mod rule_yaml;
pub mod syscall;
pub mod validate;

pub use alert::{Alert, WebhookAlert};
pub use rule::{Condition, Operator, Rule, RuleSet};
pub use syscall::{Syscall, SyscallArg};
