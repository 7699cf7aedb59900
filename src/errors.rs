//! Gracekeeper error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced by license validation.
///
/// The set is closed: configuration problems surface synchronously at
/// construction, network failures are embedded in [`ValidationResult`]s
/// (and re-raised only by [`LicenseAgent::ensure_valid`]), and validation
/// failures are raised only by `ensure_valid` for a confirmed invalid
/// verdict.
///
/// All variants carry plain data and the enum is `Clone`, so a failure can
/// travel inside a result without borrowing the transport error that caused
/// it.
///
/// [`ValidationResult`]: crate::agent::ValidationResult
/// [`LicenseAgent::ensure_valid`]: crate::agent::LicenseAgent::ensure_valid
#[derive(Debug, Clone, Error)]
pub enum GracekeeperError {
    /// Configuration is invalid (missing or empty required field).
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote verdict source could not be reached or answered abnormally
    /// (connect error, timeout, non-2xx status, undecodable body).
    #[error("network failure: {0}")]
    Network(String),

    /// The license was confirmed invalid by an online or cached verdict.
    #[error("license validation failed{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    Validation {
        /// Reason code reported by the verdict source, if any.
        reason: Option<String>,

        /// Status label reported by the verdict source, if any.
        status: Option<String>,

        /// License expiry, if the verdict carried one.
        expires_at: Option<DateTime<Utc>>,

        /// Opaque entitlement payload from the verdict, if any.
        allowed_data: Option<serde_json::Value>,
    },
}

impl GracekeeperError {
    /// Whether this error is a network failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_predicate() {
        assert!(GracekeeperError::Network("boom".into()).is_network());
        assert!(!GracekeeperError::Config("x".into()).is_network());
    }

    #[test]
    fn validation_display_includes_reason() {
        let err = GracekeeperError::Validation {
            reason: Some("license_expired".into()),
            status: None,
            expires_at: None,
            allowed_data: None,
        };
        assert_eq!(err.to_string(), "license validation failed: license_expired");
    }

    #[test]
    fn validation_display_without_reason() {
        let err = GracekeeperError::Validation {
            reason: None,
            status: None,
            expires_at: None,
            allowed_data: None,
        };
        assert_eq!(err.to_string(), "license validation failed");
    }
}
