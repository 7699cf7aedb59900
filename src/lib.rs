//! # Gracekeeper
//!
//! **License-entitlement client with offline grace-period fallback.**
//!
//! Gracekeeper asks a remote license authority whether a product/key pair is
//! currently valid and keeps answering sensibly when that authority is
//! unreachable:
//!
//! - **One-entry result cache** — the last online verdict, stale after the
//!   cache TTL (default 1 hour)
//! - **Grace period** — a failed check reuses the last known-good verdict for
//!   up to the grace window (default 24 hours) instead of disabling the
//!   product
//! - **Structured degradation** — `validate` never fails on network
//!   conditions; results carry `is_offline` / `is_grace_period` flags and the
//!   triggering error
//!
//! ## Quickstart
//!
//! ```no_run
//! use gracekeeper::{GracekeeperConfig, LicenseAgent};
//!
//! fn main() -> Result<(), gracekeeper::GracekeeperError> {
//!     let config = GracekeeperConfig::new(
//!         "https://license.example.com",
//!         "your-secret-license-key",
//!         "your-product",
//!     );
//!
//!     let agent = LicenseAgent::new(config)?;
//!     let result = agent.validate(None);
//!
//!     if result.is_valid {
//!         println!("License valid! (offline: {})", result.is_offline);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Degradation model
//!
//! Each `validate` call resolves to exactly one of five outcomes: a fresh
//! cached answer, a clean online answer, or one of three offline answers
//! (no cache at all, within grace, grace elapsed). Only clean online answers
//! are ever cached, so a transient outage cannot pollute future freshness
//! decisions.
//!
//! Callers that prefer errors over flags use [`LicenseAgent::ensure_valid`],
//! which stays silent for valid and grace-covered verdicts and otherwise
//! raises the network or validation failure behind the result.
//!
//! ## Configuration
//!
//! - `server_url` — base URL of the license authority (required)
//! - `license_key` — secret key, sent in the body and as Bearer auth (required)
//! - `product` — product name being validated (required)
//! - `cache_ttl` / `grace_period` / `request_timeout` — freshness, offline
//!   tolerance, and per-request timeout windows
//! - `metadata` — static map merged into every request
//!
//! See [`GracekeeperConfig`] for full documentation.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Protocol layer
pub mod protocol;

// Client layer
pub mod client;

// Cache layer
pub mod cache;

// Agent (main public API)
pub mod agent;

// Re-exports for public API
pub use agent::{LicenseAgent, ValidationResult};
pub use client::VerdictSource;
pub use clock::{Clock, SystemClock};
pub use config::GracekeeperConfig;
pub use errors::GracekeeperError;
pub use protocol::models::Verdict;

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
