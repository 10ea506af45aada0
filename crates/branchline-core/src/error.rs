//! Telemetry error types.

use thiserror::Error;

/// Failure reported by a telemetry sink.
///
/// Callers never propagate this past the delivery task; it only ends up in
/// logs.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The sink could not hand the event to its backend.
    #[error("telemetry delivery failed: {0}")]
    Delivery(String),

    /// The sink was shut down before the event arrived.
    #[error("telemetry sink closed")]
    Closed,
}
