use std::sync::Arc;
use std::time::Duration;

use warden_common::api::CallableSyscallsResponse;
use warden_common::Syscall;

use super::error::{bounded, StoreError};
use super::syscall_source::SyscallSource;

#[derive(Clone)]
pub struct SyscallRegistry {
    source: Arc<dyn SyscallSource>,
    timeout: Duration,
}

impl SyscallRegistry {
    pub fn new(source: Arc<dyn SyscallSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Member order is whatever the source returns; duplicates are kept.
    pub async fn callable_syscalls(&self) -> Result<CallableSyscallsResponse, StoreError> {
        let names = bounded(self.timeout, "reading syscall set", self.source.members()).await?;
        tracing::debug!(count = names.len(), "callable syscalls fetched");
        let syscalls = names.into_iter().map(Syscall::from_name).collect();
        Ok(CallableSyscallsResponse::new(syscalls))
    }
}
