//! Runtime settings for the dashboard client
//!
//! Everything here is either a compiled-in constant matching the backend's
//! expectations or an override coming from the environment / CLI flags.

use std::time::Duration;

/// Default API host when neither `--api-url` nor `CARTEIRA_API_URL` is set
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Maximum automatic retries after a failed portfolio list fetch
pub const MAX_RETRIES: u32 = 3;

/// Flat delay between retry attempts (not exponential)
pub const RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Interval between automatic price refresh cycles (5 minutes)
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Minimum query length before symbol suggestions are requested
pub const MIN_SUGGEST_LEN: usize = 3;

/// Debounce applied to suggestion lookups in interactive views
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(300);

/// Retry schedule for the portfolio list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            delay: RETRY_DELAY,
        }
    }
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub refresh_interval: Duration,
    pub retry: RetryPolicy,
}

impl Settings {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(api_url.into()),
            refresh_interval: REFRESH_INTERVAL,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Ensure the base URL ends with a slash so relative joins keep the path
fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
