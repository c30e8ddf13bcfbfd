//! HTTP client for the `OpenCage` forward-geocoding API.
//!
//! Wraps `reqwest` with API key management, country restriction and typed
//! response deserialization. Non-2xx responses are surfaced as
//! [`GeocodeError::Api`] with the provider's own status message when present.

use std::time::Duration;

use cmship_core::GeocodeResult;
use futures::future::BoxFuture;
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::provider::{GeocodeProvider, GeocodeRequest};
use crate::types::OpenCageResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Client for the `OpenCage` geocoding API.
///
/// Use [`OpenCageClient::new`] for production or
/// [`OpenCageClient::with_base_url`] to point at a mock server in tests.
pub struct OpenCageClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl OpenCageClient {
    /// Creates a new client pointed at the production `OpenCage` API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(GeocodeError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Forward-geocodes `request.query`, returning candidates in provider order.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Api`] if the provider answers with a non-2xx status.
    /// - [`GeocodeError::Http`] on network failure or timeout.
    /// - [`GeocodeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        request: &GeocodeRequest,
    ) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let url = self.build_url(request);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        let parsed: OpenCageResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("forward geocode for '{}'", request.query),
                source: e,
            })?;

        tracing::debug!(
            query = %request.query,
            results = parsed.results.len(),
            total = ?parsed.total_results,
            "opencage lookup complete"
        );

        Ok(parsed.results.into_iter().map(GeocodeResult::from).collect())
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, request: &GeocodeRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &request.query);
            pairs.append_pair("key", &self.api_key);
            if let Some(cc) = &request.country_code {
                pairs.append_pair("countrycode", cc);
            }
            pairs.append_pair("limit", &request.limit.to_string());
            pairs.append_pair("no_annotations", "1");
        }
        url
    }

    /// Maps a non-2xx response to [`GeocodeError::Api`], preferring the
    /// message from the provider's status envelope.
    fn api_error(status: reqwest::StatusCode, body: &str) -> GeocodeError {
        let message = serde_json::from_str::<OpenCageResponse>(body)
            .ok()
            .and_then(|r| r.status)
            .map_or_else(
                || {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                },
                |s| s.message,
            );
        GeocodeError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl GeocodeProvider for OpenCageClient {
    fn geocode<'a>(
        &'a self,
        request: &'a GeocodeRequest,
    ) -> BoxFuture<'a, Result<Vec<GeocodeResult>, GeocodeError>> {
        Box::pin(self.search(request))
    }

    fn name(&self) -> &'static str {
        "opencage"
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
