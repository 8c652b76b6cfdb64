use crate::clock::Clock;
use crate::error::FetchError;
use config::RetryPolicy;
use std::future::Future;
use tracing::{debug, warn};

/// Run `op` until it succeeds, fails permanently, or runs out of attempts.
///
/// Only [`FetchError::is_transient`] errors are retried. The delay before
/// retry `n` is `policy.delay_for(n)`, slept through `clock`. When attempts
/// run out the last error is wrapped in [`FetchError::Exhausted`].
pub async fn with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    clock: &dyn Clock,
    what: &str,
    mut op: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let attempts = policy.attempts();
    let mut retry = 0u32;
    loop {
        match op().await {
            Ok(value) => {
                if retry > 0 {
                    debug!(what, retry, "succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) if retry + 1 >= attempts => {
                return Err(FetchError::Exhausted {
                    endpoint: what.to_owned(),
                    attempts,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                let delay = policy.delay_for(retry);
                warn!(what, retry, ?delay, %err, "transient failure, backing off");
                clock.sleep(delay).await;
                retry += 1;
            }
        }
    }
}
