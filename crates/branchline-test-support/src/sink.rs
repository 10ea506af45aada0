//! Test sinks: `TelemetrySink` doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use branchline_core::error::TelemetryError;
use branchline_core::sink::{RecordedEvent, TelemetrySink};

/// A sink that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    recorded: Mutex<Vec<RecordedEvent>>,
}

impl RecordingTelemetrySink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn recorded(&self) -> Vec<RecordedEvent> {
        self.recorded.lock().unwrap().clone()
    }

    /// Names of the events received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn names(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.name.clone())
            .collect()
    }
}

#[async_trait]
impl TelemetrySink for RecordingTelemetrySink {
    async fn record(&self, event: RecordedEvent) -> Result<(), TelemetryError> {
        self.recorded.lock().unwrap().push(event);
        Ok(())
    }
}

/// A sink whose every delivery fails. Useful for checking that gameplay
/// never depends on telemetry.
#[derive(Debug)]
pub struct FailingTelemetrySink;

#[async_trait]
impl TelemetrySink for FailingTelemetrySink {
    async fn record(&self, _event: RecordedEvent) -> Result<(), TelemetryError> {
        Err(TelemetryError::Delivery("collector unreachable".into()))
    }
}
