//! Generic exponential-backoff helper used by callers of the proxy endpoints.
//!
//! The attempt budget counts the first try, the delay doubles after every
//! failed attempt, all failures are treated uniformly, and only the final
//! attempt's error is propagated.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Attempt budget and starting delay for [`with_backoff`].
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Total attempts, counting the first try.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub initial_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

/// Runs `op` until it succeeds or the attempt budget is exhausted.
///
/// No error inspection happens here; a rate limit and a dropped connection
/// retry the same way. The last error is returned as-is, never a synthesized
/// one. A zero budget still makes one attempt.
pub async fn with_backoff<T, E, F, Fut>(policy: BackoffPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let budget = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= budget => {
                warn!("All {attempt} attempts failed: {err}");
                return Err(err);
            }
            Err(err) => {
                warn!(
                    "Attempt {attempt} failed ({err}). Retrying in {}ms...",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
        }
    }
}
