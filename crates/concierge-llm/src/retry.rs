//! Bounded retry with exponential backoff for HTTP gateways

use crate::GatewayError;
use std::time::Duration;
use tracing::warn;

/// Longest wait between two attempts
pub(crate) const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Run `attempt` up to `max_attempts` times (at least once)
///
/// Only transient errors are retried. The delay doubles after each failure:
/// `base`, `2 * base`, `4 * base`, ... capped at [`MAX_BACKOFF`].
pub(crate) fn with_retries<T>(
    max_attempts: u32,
    base: Duration,
    mut attempt: impl FnMut() -> Result<T, GatewayError>,
) -> Result<T, GatewayError> {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempts += 1;
                if !e.is_transient() || attempts >= max_attempts {
                    return Err(e);
                }
                let delay = backoff_delay(base, attempts);
                warn!(
                    "Gateway attempt {}/{} failed: {}; retrying in {:?}",
                    attempts, max_attempts, e, delay
                );
                std::thread::sleep(delay);
            }
        }
    }
}

/// Delay after the `failures`-th failed attempt
fn backoff_delay(base: Duration, failures: u32) -> Duration {
    let factor = 2u32.saturating_pow(failures.saturating_sub(1));
    base.checked_mul(factor)
        .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
}
