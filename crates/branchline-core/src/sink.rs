//! Telemetry sink abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::TelemetryError;

/// Flattened representation of a telemetry event as handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Session this event belongs to.
    pub session_id: Uuid,
    /// Event name from the telemetry contract.
    pub name: String,
    /// Event parameters.
    pub params: serde_json::Value,
    /// Position within the session stream.
    pub sequence_number: i64,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// External collaborator receiving telemetry notifications.
///
/// Implementations may fail or be slow; the game never waits on them and
/// never observes their errors beyond a log line.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Deliver a single event.
    async fn record(&self, event: RecordedEvent) -> Result<(), TelemetryError>;
}
