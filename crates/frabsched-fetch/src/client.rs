//! HTTP client for schedule downloads.
//!
//! A single GET with `Accept-Encoding: identity`; the body is handed to the
//! core parser untouched.

use frabsched_core::{EventRecord, ScheduleParser};
use reqwest::header::{ACCEPT_ENCODING, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, trace, warn};

use crate::config::FetchConfig;
use crate::error::{FetchError, FetchResult};

/// HTTP client bound to one schedule URL.
pub struct ScheduleClient {
    client: Client,
    config: FetchConfig,
}

impl ScheduleClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                FetchError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// Downloads the schedule and returns the raw body.
    pub async fn fetch_bytes(&self) -> FetchResult<Vec<u8>> {
        let url = self.config.url_str();
        trace!(url = %url, "Sending request");

        let response = self
            .client
            .get(self.config.url.clone())
            .header(ACCEPT_ENCODING, HeaderValue::from_static("identity"))
            .send()
            .await
            .map_err(|e| transport_error("Request failed", e).with_url(url))?;

        let body = self
            .handle_response(response)
            .await
            .map_err(|e| e.with_url(url))?;

        debug!(url = %url, bytes = body.len(), "Fetched schedule");
        Ok(body)
    }

    /// Downloads and parses the schedule, tagging records with `group`.
    pub async fn fetch_schedule(&self, group: &str) -> FetchResult<Vec<EventRecord>> {
        let body = self.fetch_bytes().await?;
        ScheduleParser::new(group)
            .parse(&body)
            .map_err(|e| FetchError::from(e).with_url(self.config.url_str()))
    }

    /// Handles the HTTP response and extracts the body.
    async fn handle_response(&self, response: Response) -> FetchResult<Vec<u8>> {
        let status = response.status();
        trace!(status = %status, "Received response");

        match status {
            StatusCode::OK => response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| transport_error("Failed to read response", e)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::access_denied(
                format!("Access denied ({})", status),
            )),
            StatusCode::NOT_FOUND => Err(FetchError::not_found("Schedule not found")),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(FetchError::rate_limited("Too many requests to server"))
            }
            s if s.is_server_error() => Err(FetchError::server(format!("Server error ({})", s))),
            s => {
                warn!(status = %s, "Unexpected response status");
                Err(FetchError::invalid_response(format!(
                    "Unexpected status {}",
                    s
                )))
            }
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

/// Maps a reqwest failure to a timeout or network error.
fn transport_error(context: &str, err: reqwest::Error) -> FetchError {
    let fetch_err = if err.is_timeout() {
        FetchError::timeout(format!("{}: {}", context, err))
    } else {
        FetchError::network(format!("{}: {}", context, err))
    };
    fetch_err.with_source(err)
}

/// Fetches the schedule at `url` with default settings and parses it.
///
/// # Errors
///
/// Fails with [`FetchErrorCode::ConfigurationError`](crate::FetchErrorCode)
/// for an invalid URL, a transport or status code for HTTP failures, and
/// [`FetchErrorCode::ParseError`](crate::FetchErrorCode) when the body is
/// not a valid schedule.
pub async fn get_schedule(url: &str, group: &str) -> FetchResult<Vec<EventRecord>> {
    ScheduleClient::new(FetchConfig::from_url(url)?)?
        .fetch_schedule(group)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchErrorCode;
    use std::time::Duration;

    #[test]
    fn client_creation() {
        let config = FetchConfig::new("https://example.org/schedule.xml")
            .unwrap()
            .with_timeout(Duration::from_secs(10));

        let client = ScheduleClient::new(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn get_schedule_rejects_bad_url() {
        let err = get_schedule("::not-a-url", "g").await.unwrap_err();
        assert_eq!(err.code(), FetchErrorCode::ConfigurationError);
        assert_eq!(err.url(), Some("::not-a-url"));
    }
}
