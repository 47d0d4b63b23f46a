use std::future::Future;
use std::time::Duration;

#[derive(Debug)]
pub enum StoreError {
    /// The backing service could not be reached or did not answer in time.
    Unavailable(String),
    /// The backing service answered with a failure status.
    Upstream(String),
    /// The object changed since the version the caller read.
    Conflict(String),
    /// The stored document could not be encoded or decoded.
    Decode(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "upstream unavailable: {msg}"),
            Self::Upstream(msg) => write!(f, "upstream error: {msg}"),
            Self::Conflict(msg) => write!(f, "conflict: {msg}"),
            Self::Decode(msg) => write!(f, "decode: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Runs one upstream call under a deadline; an elapsed deadline is `Unavailable`.
pub(crate) async fn bounded<T, F>(timeout: Duration, op: &str, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Unavailable(format!(
            "{op} timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}
