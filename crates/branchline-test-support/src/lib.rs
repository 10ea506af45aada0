//! Shared test doubles and content fixtures for Branchline.

mod clock;
pub mod fixtures;
mod loader;
mod sink;

pub use clock::FixedClock;
pub use loader::{FailingSpecLoader, FixedSpecLoader, PendingSpecLoader};
pub use sink::{FailingTelemetrySink, RecordingTelemetrySink};
