mod alerts;
mod attack;
mod health;
mod metrics;
mod router;
mod rules;
mod syscalls;

pub use alerts::AlertsQuery;
pub use router::{router, AppState};
