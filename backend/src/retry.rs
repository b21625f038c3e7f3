use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::StoreError;

/// Bounded retry with exponential backoff for transient store failures,
/// applied uniformly to the read-only query path.
///
/// The first `max_attempts - 1` attempts swallow transient errors and back
/// off (base, 2x base, ...); the final attempt's error propagates unmasked.
/// Non-transient errors are never retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(50),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
        }
    }

    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        for attempt in 0..self.max_attempts - 1 {
            match op().await {
                Err(e) if e.is_transient() => {
                    let backoff = self.base_backoff * 2u32.pow(attempt);
                    warn!(
                        "Transient store failure on attempt {}: {}. Retrying in {:?}",
                        attempt + 1,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                other => return other,
            }
        }
        op().await
    }
}
