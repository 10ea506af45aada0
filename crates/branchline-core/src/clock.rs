//! Clock abstraction used to timestamp telemetry envelopes.

use chrono::{DateTime, Utc};

/// Source of wall-clock time, injected so telemetry timestamps are
/// reproducible in tests.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by `Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
