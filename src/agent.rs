//! License agent - the main public API.
//!
//! The `LicenseAgent` turns a sequence of (possibly failing) remote checks
//! into one coherent validity verdict over time:
//! - a fresh cached verdict is served without a remote call,
//! - a stale or missing cache triggers an online check,
//! - a failed online check degrades to the last known-good verdict while the
//!   grace window holds, and to a structured failure afterwards.
//!
//! `validate` never returns an error for network conditions; every failure is
//! encoded in the returned [`ValidationResult`]. Callers that want errors
//! instead of flags use [`LicenseAgent::ensure_valid`].

use crate::cache::memory::{CacheEntry, VerdictCache};
use crate::client::http::HttpVerdictSource;
use crate::client::VerdictSource;
use crate::clock::{Clock, SystemClock};
use crate::config::GracekeeperConfig;
use crate::protocol::models::{
    parse_expiry, ValidationRequest, Verdict, REASON_GRACE_PERIOD, REASON_NO_CACHE,
    REASON_OFFLINE_FAILED,
};
use crate::GracekeeperError;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one validation call.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the license may be treated as valid right now.
    pub is_valid: bool,

    /// Set only when the verdict was produced without a successful remote
    /// round-trip on this call. Implies `error` holds a network failure.
    pub is_offline: bool,

    /// Set only when offline AND the last known-good verdict is still inside
    /// the grace window. Implies `is_offline`.
    pub is_grace_period: bool,

    /// Reason code: from the verdict source, or one of the offline reasons.
    pub reason: Option<String>,

    /// Status label from the verdict source, if any.
    pub status: Option<String>,

    /// License expiry, if the verdict carried a parseable one.
    pub expires_at: Option<DateTime<Utc>>,

    /// Opaque entitlement payload from the verdict, if any.
    pub allowed_data: Option<Value>,

    /// The triggering network failure, if any.
    pub error: Option<GracekeeperError>,

    /// When the last successful remote check happened. Absent when no
    /// successful check has ever occurred.
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl ValidationResult {
    /// Build a clean online result from a raw verdict.
    fn from_verdict(verdict: &Verdict, now: DateTime<Utc>) -> Self {
        Self {
            is_valid: verdict.is_valid,
            is_offline: false,
            is_grace_period: false,
            reason: verdict.reason.clone(),
            status: verdict.status.clone(),
            expires_at: parse_expiry(verdict.expires_at.as_deref()),
            allowed_data: verdict.allowed_data.clone(),
            error: None,
            last_checked_at: Some(now),
        }
    }
}

/// License-entitlement agent.
///
/// One instance validates exactly one product/key pair. Create it once and
/// reuse it; the agent owns the single cache slot.
pub struct LicenseAgent {
    config: GracekeeperConfig,
    clock: Arc<dyn Clock>,
    source: Arc<dyn VerdictSource>,
    cache: VerdictCache,
}

impl LicenseAgent {
    /// Create an agent with the given configuration.
    ///
    /// # Errors
    /// Returns [`GracekeeperError::Config`] when a required field is missing
    /// or the HTTP client cannot be built. No network activity happens here.
    pub fn new(config: GracekeeperConfig) -> Result<Self, GracekeeperError> {
        config.validate()?;
        let source = Arc::new(HttpVerdictSource::new(&config)?);
        Ok(Self::assemble(config, Arc::new(SystemClock), source))
    }

    /// Create an agent with a custom clock and verdict source (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn with_parts(
        config: GracekeeperConfig,
        clock: Arc<dyn Clock>,
        source: Arc<dyn VerdictSource>,
    ) -> Result<Self, GracekeeperError> {
        config.validate()?;
        Ok(Self::assemble(config, clock, source))
    }

    fn assemble(
        config: GracekeeperConfig,
        clock: Arc<dyn Clock>,
        source: Arc<dyn VerdictSource>,
    ) -> Self {
        Self {
            config,
            clock,
            source,
            cache: VerdictCache::new(),
        }
    }

    /// Validate the license, answering from cache when fresh.
    ///
    /// Never returns an error: network failures are encoded in the result
    /// (`is_offline`, `is_grace_period`, `error`). `metadata` is merged over
    /// the configured static metadata; dynamic keys win on collision.
    pub fn validate(&self, metadata: Option<&Map<String, Value>>) -> ValidationResult {
        self.validate_inner(metadata, false)
    }

    /// Validate the license, always attempting a remote check.
    ///
    /// Bypasses the freshness window but keeps offline resilience: when the
    /// forced attempt fails, the previously cached verdict still feeds the
    /// grace-period fallback. The cache is replaced only by a successful
    /// answer.
    pub fn force_validate(&self, metadata: Option<&Map<String, Value>>) -> ValidationResult {
        self.validate_inner(metadata, true)
    }

    /// Validate and signal failure instead of returning flags.
    ///
    /// # Errors
    /// - the result's network failure, when offline without grace coverage;
    /// - [`GracekeeperError::Validation`] carrying the reason/status/expiry/
    ///   allowed-data of a confirmed invalid verdict.
    ///
    /// Grace-period answers never block the caller.
    pub fn ensure_valid(
        &self,
        metadata: Option<&Map<String, Value>>,
    ) -> Result<(), GracekeeperError> {
        let result = self.validate(metadata);

        if result.is_valid {
            return Ok(());
        }

        // Grace results are always valid by construction, so this branch is
        // unreachable today. Kept as a guard against future result shapes:
        // a degraded-but-covered answer must never block the caller.
        if result.is_grace_period {
            return Ok(());
        }

        if let Some(error) = result.error {
            if error.is_network() {
                return Err(error);
            }
        }

        Err(GracekeeperError::Validation {
            reason: result.reason,
            status: result.status,
            expires_at: result.expires_at,
            allowed_data: result.allowed_data,
        })
    }

    /// Erase the cached verdict. The next `validate` call goes remote.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GracekeeperConfig {
        &self.config
    }

    fn validate_inner(
        &self,
        metadata: Option<&Map<String, Value>>,
        bypass_freshness: bool,
    ) -> ValidationResult {
        let now = self.clock.now_utc();
        // Snapshot before the remote attempt so a forced check can still fall
        // back to the prior entry when the attempt fails.
        let entry = self.cache.get();

        if !bypass_freshness {
            if let Some(entry) = &entry {
                if entry.is_fresh(self.config.cache_ttl, now) {
                    debug!(
                        age_seconds = now.signed_duration_since(entry.cached_at).num_seconds(),
                        "serving cached verdict"
                    );
                    return entry.result.clone();
                }
            }
        }

        let request = ValidationRequest {
            license_key: self.config.license_key.clone(),
            product_name: self.config.product.clone(),
            metadata: self.merged_metadata(metadata),
        };

        match self.source.check(&request) {
            Ok(verdict) => {
                let result = ValidationResult::from_verdict(&verdict, now);
                self.cache.set(&result, now);
                info!(is_valid = result.is_valid, "online license check completed");
                result
            }
            Err(error) => {
                warn!(error = %error, "online license check failed, using cached verdict");
                self.offline_result(entry, error, now)
            }
        }
    }

    /// Degraded answer for a failed remote attempt, derived from the cache
    /// snapshot taken before the attempt.
    fn offline_result(
        &self,
        entry: Option<CacheEntry>,
        error: GracekeeperError,
        now: DateTime<Utc>,
    ) -> ValidationResult {
        let Some(entry) = entry else {
            // No successful check has ever happened.
            return ValidationResult {
                is_valid: false,
                is_offline: true,
                is_grace_period: false,
                reason: Some(REASON_NO_CACHE.to_string()),
                status: None,
                expires_at: None,
                allowed_data: None,
                error: Some(error),
                last_checked_at: None,
            };
        };

        let mut result = entry.result.clone();
        result.is_offline = true;
        result.error = Some(error);

        if entry.result.is_valid && entry.within_grace(self.config.grace_period, now) {
            // The product keeps operating on the strength of the last
            // known-good verdict.
            result.is_valid = true;
            result.is_grace_period = true;
            result.reason = Some(REASON_GRACE_PERIOD.to_string());
        } else {
            result.is_valid = false;
            result.is_grace_period = false;
            if result.reason.is_none() {
                result.reason = Some(REASON_OFFLINE_FAILED.to_string());
            }
        }

        result
    }

    fn merged_metadata(
        &self,
        dynamic: Option<&Map<String, Value>>,
    ) -> Option<Map<String, Value>> {
        let mut merged = self.config.metadata.clone();
        if let Some(dynamic) = dynamic {
            for (key, value) in dynamic {
                merged.insert(key.clone(), value.clone());
            }
        }
        if merged.is_empty() {
            None
        } else {
            Some(merged)
        }
    }
}
