use std::time::Duration;

use crate::error::{AsanaError, Result};

pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`AsanaClient`](crate::AsanaClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, stored without a trailing slash.
    pub base_url: String,
    /// Personal access token or OAuth bearer token.
    pub access_token: Option<String>,
    pub timeout: Duration,
    /// Retries for 429 and 5xx responses.
    pub max_retries: u32,
    /// First backoff delay for 5xx retries; doubles on every attempt.
    pub retry_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            user_agent: format!("asana-client-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Load settings from `ASANA_BASE_URL`, `ASANA_ACCESS_TOKEN`,
    /// `ASANA_TIMEOUT_SECS` and `ASANA_MAX_RETRIES`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("ASANA_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&url);
        }
        if let Some(token) = lookup("ASANA_ACCESS_TOKEN").filter(|v| !v.trim().is_empty()) {
            config.access_token = Some(token.trim().to_string());
        }
        if let Some(raw) = lookup("ASANA_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("ASANA_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = lookup("ASANA_MAX_RETRIES") {
            config.max_retries = parse_number("ASANA_MAX_RETRIES", &raw)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.retry_backoff_ms = backoff_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| AsanaError::Configuration {
        message: format!("{key} must be a non-negative integer, got {raw:?}"),
    })
}
