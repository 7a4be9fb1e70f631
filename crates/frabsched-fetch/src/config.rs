//! Fetch configuration.

use std::time::Duration;
use url::Url;

use crate::error::{FetchError, FetchResult};

/// Configuration for fetching one schedule URL.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// URL of the Frab schedule XML.
    pub url: Url,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// Request timeout, covering connect and body read.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl FetchConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a new fetch configuration for the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(url.as_ref())?;
        Ok(Self {
            url: parsed,
            verify_tls: true,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("frabsched/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Creates a configuration, reporting a bad URL as a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchErrorCode::ConfigurationError`](crate::FetchErrorCode)
    /// carrying the URL and the parse error as its source.
    pub fn from_url(url: &str) -> FetchResult<Self> {
        Self::new(url).map_err(|e| {
            FetchError::configuration(format!("Invalid schedule URL: {}", e))
                .with_url(url)
                .with_source(e)
        })
    }

    /// Disables TLS verification (for testing only).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the URL as a string.
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a group label derived from the URL host.
    pub fn default_group(&self) -> String {
        self.url.host_str().unwrap_or("schedule").to_string()
    }
}
