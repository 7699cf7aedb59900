//! Clock abstraction so freshness and grace decisions are testable.

use chrono::{DateTime, Utc};

/// Source of "now" for TTL and grace-period arithmetic.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Frozen clock for deterministic tests.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone)]
pub struct MockClock {
    now: DateTime<Utc>,
}

#[cfg(any(test, feature = "test-seams"))]
impl MockClock {
    /// Freeze the clock at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Freeze the clock at an RFC 3339 instant.
    pub fn at(s: &str) -> Self {
        Self {
            now: DateTime::parse_from_rfc3339(s)
                .expect("valid RFC 3339")
                .with_timezone(&Utc),
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, duration: chrono::Duration) {
        self.now += duration;
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_sane() {
        use chrono::Datelike;
        assert!(SystemClock.now_utc().year() >= 2025);
    }

    #[test]
    fn mock_clock_is_frozen() {
        let clock = MockClock::at("2026-03-01T09:00:00Z");
        assert_eq!(clock.now_utc(), clock.now_utc());
        assert_eq!(clock.now_utc().to_rfc3339(), "2026-03-01T09:00:00+00:00");
    }

    #[test]
    fn mock_clock_advance() {
        let mut clock = MockClock::at("2026-03-01T09:00:00Z");
        clock.advance(chrono::Duration::minutes(90));
        assert_eq!(clock.now_utc().to_rfc3339(), "2026-03-01T10:30:00+00:00");
    }
}
