//! Remote verdict source: trait seam plus the HTTP implementation.

pub mod http;

use crate::protocol::models::{ValidationRequest, Verdict};
use crate::GracekeeperError;

/// Answers "is this license valid right now" for a validation request.
///
/// The agent talks to the authority exclusively through this trait, so tests
/// can script outcomes without a network. [`http::HttpVerdictSource`] is the
/// production implementation.
pub trait VerdictSource: Send + Sync {
    /// Perform one remote check. Every transport-level failure (connect
    /// error, timeout, non-2xx status, undecodable body) surfaces as
    /// [`GracekeeperError::Network`].
    fn check(&self, request: &ValidationRequest) -> Result<Verdict, GracekeeperError>;
}
