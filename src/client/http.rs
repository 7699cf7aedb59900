//! Reqwest-based verdict source.
//!
//! One POST per validation attempt against a fixed route, authenticated with
//! the license key as a Bearer token. The request is abandoned once it
//! exceeds the configured timeout; a timed-out call surfaces as an ordinary
//! network failure.

use crate::client::VerdictSource;
use crate::config::GracekeeperConfig;
use crate::protocol::models::{ValidationRequest, Verdict};
use crate::GracekeeperError;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

/// Path of the validation route, relative to the server URL.
pub const VALIDATE_PATH: &str = "/api/v1/licenses/validate";

/// HTTP client for the license authority.
pub struct HttpVerdictSource {
    client: Client,
    endpoint: String,
    license_key: String,
}

impl HttpVerdictSource {
    /// Build a client from config, applying the configured request timeout.
    pub fn new(config: &GracekeeperConfig) -> Result<Self, GracekeeperError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                GracekeeperError::Config(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: validation_endpoint(&config.server_url),
            license_key: config.license_key.clone(),
        })
    }

    /// The full validation endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl VerdictSource for HttpVerdictSource {
    fn check(&self, request: &ValidationRequest) -> Result<Verdict, GracekeeperError> {
        debug!(endpoint = %self.endpoint, product = %request.product_name, "remote license check");

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.license_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| GracekeeperError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GracekeeperError::Network(format!(
                "server returned {status}"
            )));
        }

        response
            .json::<Verdict>()
            .map_err(|e| GracekeeperError::Network(format!("failed to decode verdict: {e}")))
    }
}

/// Join the server URL and the validation path, tolerating a trailing slash.
pub fn validation_endpoint(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), VALIDATE_PATH)
}
