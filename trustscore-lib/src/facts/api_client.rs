use crate::Result;
use crate::facts::resilient_http::resilient_get;
use crate::facts::throttler::Throttler;
use chrono::{DateTime, Utc};
use core::fmt::Display;
use core::time::Duration;
use ohno::{EnrichableExt, app_err};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use std::sync::Arc;

const LOG_TARGET: &str = "       api";

/// Longest time a rate-limit response may hold back the shared throttler
const MAX_RATE_LIMIT_PAUSE: Duration = Duration::from_secs(60);

/// Result of a metadata API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded
    Success(T),

    /// The service refused the request because of rate limiting, with the wait it asked for
    RateLimited(Option<Duration>),

    /// The requested resource does not exist (404)
    NotFound,

    /// Request failed permanently
    Failed(ohno::AppError),
}

impl<T> ApiResult<T> {
    /// Flatten into a `Result`, treating everything but success as an error about `what`.
    pub fn into_result(self, what: impl Display) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::RateLimited(_) => Err(app_err!("rate limited while fetching {what}")),
            Self::NotFound => Err(app_err!("{what} not found")),
            Self::Failed(e) => Err(e.enrich_with(|| format!("fetching {what}"))),
        }
    }

    /// Like [`into_result`](Self::into_result) but maps a missing resource to `None`.
    pub fn into_option(self, what: impl Display) -> Result<Option<T>> {
        match self {
            Self::NotFound => Ok(None),
            other => other.into_result(what).map(Some),
        }
    }
}

/// Unwrap an `ApiResult::Success` or return any other variant unchanged.
macro_rules! unwrap_or_return {
    ($expr:expr) => {
        match $expr {
            ApiResult::Success(data) => data,
            ApiResult::RateLimited(wait) => return ApiResult::RateLimited(wait),
            ApiResult::NotFound => return ApiResult::NotFound,
            ApiResult::Failed(e) => return ApiResult::Failed(e),
        }
    };
}

/// A JSON-over-HTTP API rooted at a base URL, sharing a [`Throttler`] with its siblings.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    throttler: Arc<Throttler>,
}

impl ApiClient {
    /// Create a client. `authorization` is sent verbatim in the `Authorization` header.
    pub fn new(base_url: &str, authorization: Option<String>, request_timeout: Duration, throttler: Arc<Throttler>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("trustscore/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout);

        if let Some(auth) = authorization {
            let mut auth_val = HeaderValue::from_str(&auth)?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            builder = builder.default_headers(headers);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            throttler,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (relative to the base URL) and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let _permit = self.throttler.acquire().await;
        let resp = unwrap_or_return!(self.send(path).await);

        match resp.json().await {
            Ok(data) => ApiResult::Success(data),
            Err(e) => ApiResult::Failed(e.into()),
        }
    }

    /// GET `path` (relative to the base URL) and return the body as text.
    pub async fn get_text(&self, path: &str) -> ApiResult<String> {
        let _permit = self.throttler.acquire().await;
        let resp = unwrap_or_return!(self.send(path).await);

        match resp.text().await {
            Ok(text) => ApiResult::Success(text),
            Err(e) => ApiResult::Failed(e.into()),
        }
    }

    async fn send(&self, path: &str) -> ApiResult<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = match resilient_get(&self.client, &url, self.request_timeout).await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.enrich_with(|| format!("requesting {url}"))),
        };

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp);
        }

        if status == StatusCode::NOT_FOUND {
            return ApiResult::NotFound;
        }

        if let Some(wait) = rate_limit_wait(status, resp.headers(), Utc::now()) {
            log::warn!(target: LOG_TARGET, "rate limited by {}", self.base_url);
            if let Some(wait) = wait {
                let _ = self.throttler.pause_for(wait.min(MAX_RATE_LIMIT_PAUSE));
            }
            return ApiResult::RateLimited(wait);
        }

        match resp.error_for_status() {
            Ok(resp) => ApiResult::Success(resp),
            Err(e) => ApiResult::Failed(e.into()),
        }
    }
}

/// Decide whether a failed response means "rate limited" and, if so, how long the service
/// asked us to wait (when it said).
///
/// 429 is always a rate limit. 403 is one only when the remaining quota header reads zero.
fn rate_limit_wait(status: StatusCode, headers: &HeaderMap, now: DateTime<Utc>) -> Option<Option<Duration>> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim);

    let exhausted = header("x-ratelimit-remaining").and_then(|v| v.parse::<u64>().ok()) == Some(0);
    if status != StatusCode::TOO_MANY_REQUESTS && !(status == StatusCode::FORBIDDEN && exhausted) {
        return None;
    }

    let retry_after = header(RETRY_AFTER.as_str()).and_then(|v| v.parse::<u64>().ok()).map(Duration::from_secs);
    let reset = header("x-ratelimit-reset")
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .and_then(|reset_at| (reset_at - now).to_std().ok());

    Some(retry_after.or(reset))
}
