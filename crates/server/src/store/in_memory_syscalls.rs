use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::syscall_source::SyscallSource;

#[derive(Clone, Default)]
pub struct InMemorySyscallSource {
    members: Arc<RwLock<Vec<String>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySyscallSource {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: Arc::new(RwLock::new(members.into_iter().map(Into::into).collect())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn set_members(&self, members: Vec<String>) {
        *self.members.write().await = members;
    }

    pub fn set_unavailable(&self, v: bool) {
        self.unavailable.store(v, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl SyscallSource for InMemorySyscallSource {
    async fn members(&self) -> Result<Vec<String>, StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(self.members.read().await.clone())
    }
}
