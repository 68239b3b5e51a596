//! HTTP GET wrapped in retry and timeout middleware.
//!
//! Network errors, server errors (5xx) and rate-limit responses (429) are retried with
//! exponential backoff, honoring `Retry-After` when the service sends one. Each attempt
//! runs under its own timeout.

use core::time::Duration;
use layered::{Execute, Service, Stack};
use ohno::app_err;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use seatbelt::retry::{Backoff, Retry};
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use tick::Clock;

const LOG_TARGET: &str = "      http";

/// Maximum retry attempts (on top of the original request).
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between retries.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// No single wait between attempts exceeds this, whatever `Retry-After` says.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Parse the `Retry-After` header value as seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse::<u64>().ok()
}

/// The wait a 429 response asked for, clamped to [`MAX_RETRY_DELAY`].
fn rate_limit_delay(headers: &HeaderMap) -> Option<Duration> {
    parse_retry_after(headers).map(|secs| Duration::from_secs(secs).min(MAX_RETRY_DELAY))
}

/// Classify an HTTP outcome for retry purposes.
fn should_retry_response(result: &crate::Result<reqwest::Response>) -> RecoveryInfo {
    match result {
        Err(_) => RecoveryInfo::retry(),
        Ok(resp) if resp.status().is_server_error() => RecoveryInfo::retry(),
        Ok(resp) if resp.status() == StatusCode::TOO_MANY_REQUESTS => {
            rate_limit_delay(resp.headers()).map_or_else(RecoveryInfo::retry, |delay| RecoveryInfo::retry().delay(delay))
        }
        _ => RecoveryInfo::never(),
    }
}

/// Send an HTTP GET request with automatic retry and a per-attempt timeout.
///
/// The final response is returned as-is, so callers still see a 5xx or 429 status once
/// the retries are exhausted.
pub async fn resilient_get(client: &reqwest::Client, url: &str, timeout: Duration) -> crate::Result<reqwest::Response> {
    let clock = Clock::new_tokio();
    let context = ResilienceContext::new(&clock).name("http_get");

    let client = client.clone();
    let service = (
        Retry::layer("retry", &context)
            .clone_input()
            .recovery_with(|result: &crate::Result<reqwest::Response>, _| should_retry_response(result))
            .max_retry_attempts(MAX_RETRY_ATTEMPTS)
            .base_delay(RETRY_BASE_DELAY)
            .backoff(Backoff::Exponential)
            .on_retry(|_output, args| {
                log::debug!(
                    target: LOG_TARGET,
                    "retrying GET (attempt {}, delay {}ms)",
                    args.attempt().index() + 1,
                    args.retry_delay().as_millis(),
                );
            }),
        Timeout::layer("timeout", &context)
            .timeout_error(|_| app_err!("HTTP request timed out"))
            .timeout(timeout),
        Execute::new(move |url: String| {
            let client = client.clone();
            async move { client.get(&url).send().await.map_err(ohno::AppError::from) }
        }),
    )
        .into_service();

    service.execute(url.to_string()).await
}
