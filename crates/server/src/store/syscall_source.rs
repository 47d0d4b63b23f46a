use super::error::StoreError;

/// A set of syscall names, as maintained by the cluster policy component.
#[async_trait::async_trait]
pub trait SyscallSource: Send + Sync {
    async fn members(&self) -> Result<Vec<String>, StoreError>;
}
