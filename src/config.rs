//! Gracekeeper configuration.

use serde_json::{Map, Value};
use std::time::Duration;

/// How long a cached verdict stays fresh before a new remote check is made.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// How long a prior valid verdict keeps the product running while the
/// authority is unreachable.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// How long a single remote check may take before it is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`LicenseAgent`](crate::agent::LicenseAgent).
///
/// One agent instance validates exactly one product/key pair. The three
/// required fields are checked at construction, before any network activity.
#[derive(Debug, Clone)]
pub struct GracekeeperConfig {
    /// Base URL of the license authority (e.g. `https://license.example.com`).
    pub server_url: String,

    /// Secret license key. Sent in the request body and as the Bearer
    /// authentication header.
    pub license_key: String,

    /// Product name this agent validates.
    pub product: String,

    /// Freshness window for cached verdicts.
    pub cache_ttl: Duration,

    /// Offline tolerance window measured from the last successful check.
    /// Conventionally at least `cache_ttl`; not enforced.
    pub grace_period: Duration,

    /// Timeout applied to each remote check.
    pub request_timeout: Duration,

    /// Static metadata merged into every validation request. Per-call
    /// metadata overrides these keys on collision.
    pub metadata: Map<String, Value>,
}

impl GracekeeperConfig {
    /// Build a configuration with the required fields and default windows.
    pub fn new(
        server_url: impl Into<String>,
        license_key: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            license_key: license_key.into(),
            product: product.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            grace_period: DEFAULT_GRACE_PERIOD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            metadata: Map::new(),
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::GracekeeperError> {
        if self.server_url.is_empty() {
            return Err(crate::GracekeeperError::Config(
                "server_url cannot be empty".to_string(),
            ));
        }
        if self.license_key.is_empty() {
            return Err(crate::GracekeeperError::Config(
                "license_key cannot be empty".to_string(),
            ));
        }
        if self.product.is_empty() {
            return Err(crate::GracekeeperError::Config(
                "product cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
