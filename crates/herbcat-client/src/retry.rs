//! Retry utilities for catalog reads.
//!
//! Provides exponential backoff for transient failures such as 429 and 5xx
//! responses. Non-retriable errors (decode failures, 404, 409) are returned
//! immediately. Writes are never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ClientError::RateLimited`]: HTTP 429.
/// - [`ClientError::Http`]: network-level failure (connection reset, timeout).
/// - [`ClientError::UnexpectedStatus`] with a 5xx status.
fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::RateLimited { .. } | ClientError::Http(_) => true,
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps for `backoff_base_secs * 2^attempt`
/// seconds and tries again, up to `max_retries` additional attempts after the
/// first try. If all retries are exhausted the last error is returned.
///
/// | Attempt | Sleep before next attempt (`backoff_base_secs = 1`) |
/// |---------|------------------------------------------------------|
/// | 0 (initial) | none |
/// | 1 (first retry) | 1 s |
/// | 2 (second retry) | 2 s |
/// | 3 (third retry) | 4 s |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) && attempt < max_retries => err,
            Err(err) => return Err(err),
        };

        let delay = backoff_delay(backoff_base_secs, attempt);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs = delay.as_secs(),
            error = %err,
            "transient catalog error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// `base_secs * 2^attempt`, saturating for large attempts.
fn backoff_delay(base_secs: u64, attempt: u32) -> Duration {
    Duration::from_secs(base_secs.saturating_mul(1u64 << attempt.min(62)))
}
