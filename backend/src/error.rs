use thiserror::Error;

/// Store failures, split by whether a bounded retry is worth attempting.
/// Logical rejections (duplicate vote, unknown user) are not errors and
/// never appear here; they are typed outcomes on the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Recoverable connectivity failure (network hiccup, dropped
    /// connection, timeout). Eligible for retry with backoff.
    #[error("Transient store failure: {0}")]
    Transient(String),
    /// Anything else the store reported. Never retried.
    #[error("Store failure: {0}")]
    Fatal(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal() {
            StoreError::Transient(e.to_string())
        } else {
            StoreError::Fatal(e.to_string())
        }
    }
}
