// Transport retry with exponential backoff
//
// Retry lives here and only here; pipeline stages treat any error that
// escapes the client as fatal.

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 1000;

/// Run `f` up to MAX_RETRIES times, doubling the delay between attempts.
pub async fn with_retry<F, Fut, T>(f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 < MAX_RETRIES => {
                let delay = Duration::from_millis(BASE_DELAY_MS << attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max = MAX_RETRIES,
                    error = %e,
                    "Request failed, retrying in {:?}",
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
