//! Backoff computation for HTTP 429 responses.

use chrono::{DateTime, Utc};
use std::time::Duration;

pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

const MIN_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(60);

/// How long to wait before retry number `attempt` (0-based).
///
/// Okta reports the reset time of the exhausted bucket as epoch seconds in
/// `X-Rate-Limit-Reset`. When the header is usable the wait is the time left
/// until then; otherwise it is exponential, starting at one second. Both are
/// clamped to `1s..=60s`.
pub fn retry_delay(reset_header: Option<&str>, now: DateTime<Utc>, attempt: u32) -> Duration {
    let from_header = reset_header
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(|reset| reset - now.timestamp())
        .filter(|secs| *secs > 0)
        .map(|secs| Duration::from_secs(secs as u64));

    let delay = from_header
        .unwrap_or_else(|| MIN_DELAY.saturating_mul(2u32.saturating_pow(attempt.min(16))));
    delay.clamp(MIN_DELAY, MAX_DELAY)
}
