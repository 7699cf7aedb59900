//! Validation request/response structs and reason codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reason attached to an offline answer produced while no verdict was cached.
pub const REASON_NO_CACHE: &str = "network_error_no_cache";

/// Reason attached to a degraded answer served inside the grace window.
pub const REASON_GRACE_PERIOD: &str = "grace_period";

/// Fallback reason for an offline answer after the grace window has elapsed.
pub const REASON_OFFLINE_FAILED: &str = "offline_validation_failed";

/// Request body sent to the validation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRequest {
    /// Secret license key.
    pub license_key: String,

    /// Product the key is being validated for.
    pub product_name: String,

    /// Merged static + per-call metadata. Omitted from the body entirely
    /// when the merged map is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Raw answer from the verdict source.
///
/// Produced once per successful remote call; never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    /// Whether the license is currently valid.
    pub is_valid: bool,

    /// Status label (e.g. "active", "expired").
    #[serde(default)]
    pub status: Option<String>,

    /// Machine-readable reason code.
    #[serde(default)]
    pub reason: Option<String>,

    /// License expiry as an ISO-8601 string.
    #[serde(default)]
    pub expires_at: Option<String>,

    /// Opaque entitlement payload (enabled features, limits, ...).
    #[serde(default)]
    pub allowed_data: Option<Value>,
}

/// Parse a verdict expiry string. Absent or unparseable values become `None`.
pub fn parse_expiry(expires_at: Option<&str>) -> Option<DateTime<Utc>> {
    expires_at
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
