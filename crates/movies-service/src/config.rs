//! Upstream configuration.

use std::time::Duration;

use movies_http::config::parse_or;
use movies_http::error::AppError;
use reqwest::Url;

use crate::client::RetryPolicy;

const DEFAULT_MOVIES_INFO_URL: &str = "http://localhost:8080/api/v1/movies-info";
const DEFAULT_REVIEWS_URL: &str = "http://localhost:8081/v1/reviews";

/// Where the upstream services live and how calls to them are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Base URL of the movies info service (`MOVIES_INFO_URL`).
    pub movies_info_url: Url,
    /// Base URL of the review service (`REVIEWS_URL`).
    pub reviews_url: Url,
    /// Shared retry policy (`UPSTREAM_RETRY_COUNT`, `UPSTREAM_RETRY_BACKOFF_MS`).
    pub retry: RetryPolicy,
}

impl UpstreamConfig {
    /// Reads the upstream settings, applying defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a URL does not parse or cannot carry a
    /// path, or a retry setting is not a non-negative integer.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RetryPolicy::default();
        let backoff_ms = parse_or(
            lookup,
            "UPSTREAM_RETRY_BACKOFF_MS",
            u64::try_from(defaults.backoff.as_millis()).unwrap_or(u64::MAX),
        )?;

        Ok(Self {
            movies_info_url: base_url(lookup, "MOVIES_INFO_URL", DEFAULT_MOVIES_INFO_URL)?,
            reviews_url: base_url(lookup, "REVIEWS_URL", DEFAULT_REVIEWS_URL)?,
            retry: RetryPolicy {
                max_retries: parse_or(lookup, "UPSTREAM_RETRY_COUNT", defaults.max_retries)?,
                backoff: Duration::from_millis(backoff_ms),
            },
        })
    }
}

fn base_url<F>(lookup: &F, key: &str, default: &str) -> Result<Url, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_owned());
    let url = Url::parse(&raw).map_err(|e| AppError::Config(format!("{key} must be valid: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AppError::Config(format!("{key} must be an http(s) base URL")));
    }
    Ok(url)
}
