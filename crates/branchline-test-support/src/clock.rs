//! Deterministic `Clock` for tests.

use branchline_core::clock::Clock;
use chrono::{DateTime, Utc};

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
