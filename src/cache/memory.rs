//! In-memory single-slot cache with read-time staleness.
//!
//! The cache holds at most one (result, timestamp) pair and is the only
//! mutable state in the crate. Entries never expire in place: freshness is
//! computed at read time from `now - cached_at` against the TTL, and the
//! grace window is measured against the same timestamp by the agent.
//!
//! Only clean online answers are stored. Offline and grace-period results
//! are refused so a transient outage can never pollute a future freshness
//! or grace decision.

use crate::agent::ValidationResult;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// A cached validation result and the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored clean online result.
    pub result: ValidationResult,

    /// When the result was stored.
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether this entry is still fresh: `now - cached_at < ttl` (strict).
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.cached_at);
        age.num_seconds() < ttl.as_secs() as i64
    }

    /// Whether this entry is still inside the grace window.
    pub fn within_grace(&self, grace_period: Duration, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.cached_at);
        age.num_seconds() < grace_period.as_secs() as i64
    }
}

/// The one-entry result cache.
///
/// The slot is mutex-protected so the agent stays usable behind `&self`
/// from multiple threads; concurrent writers are last-write-wins.
#[derive(Debug, Default)]
pub struct VerdictCache {
    slot: Mutex<Option<CacheEntry>>,
}

impl VerdictCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` with timestamp `now` iff it is a clean online success
    /// (not offline, not grace-period). Silently a no-op otherwise.
    pub fn set(&self, result: &ValidationResult, now: DateTime<Utc>) {
        if result.is_offline || result.is_grace_period {
            return;
        }
        *self.lock() = Some(CacheEntry {
            result: result.clone(),
            cached_at: now,
        });
    }

    /// Return a copy of the stored entry, if any.
    pub fn get(&self) -> Option<CacheEntry> {
        self.lock().clone()
    }

    /// Erase the stored entry unconditionally.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CacheEntry>> {
        // The slot holds plain data; a poisoned lock is still usable.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
