use crate::fetcher::{client::fetch, errors::FetchError, types::RawDocument};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{instrument, warn};

/// How many times a single URL is attempted before giving up.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;
/// Fixed pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Randomized pause between fetches of *different* URLs, so batch ingestion
/// doesn't hammer a site with back-to-back requests.
const POLITE_DELAY_MIN_SECS: f64 = 3.0;
const POLITE_DELAY_MAX_SECS: f64 = 5.0;

/// Fetch with a bounded retry loop: up to [`MAX_FETCH_ATTEMPTS`] attempts
/// with a fixed [`RETRY_DELAY`] between them. Only transient errors are
/// retried; the last error is returned once the budget is exhausted and the
/// caller is expected to skip the URL rather than propagate.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_with_retry(url: &str) -> Result<RawDocument, FetchError> {
    fetch_with_retry_after(url, MAX_FETCH_ATTEMPTS, RETRY_DELAY).await
}

/// Same loop with an explicit budget, so tests don't have to wait out the
/// production delay.
pub async fn fetch_with_retry_after(
    url: &str,
    max_attempts: u32,
    delay: Duration,
) -> Result<RawDocument, FetchError> {
    let mut attempt = 1;
    loop {
        match fetch(url).await {
            Ok(doc) => return Ok(doc),
            Err(err) if err.should_retry() && attempt < max_attempts => {
                warn!(
                    "fetch attempt {attempt}/{max_attempts} failed ({err}), retrying in {}s",
                    delay.as_secs_f64()
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                warn!("giving up after {attempt} attempt(s): {err}");
                return Err(err);
            }
        }
    }
}

/// Sleep 3-5 seconds with random jitter. Called by the orchestrator between
/// successive URLs to stay under anti-scraping radar.
pub async fn polite_pause() {
    let secs = rand::thread_rng().gen_range(POLITE_DELAY_MIN_SECS..POLITE_DELAY_MAX_SECS);
    sleep(Duration::from_secs_f64(secs)).await;
}
