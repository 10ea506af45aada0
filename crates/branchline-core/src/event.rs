//! Telemetry event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every telemetry event leaving a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Event name from the telemetry contract (`page_view`, `meter_update`, ...).
    pub event_name: String,
    /// Player session that produced the event.
    pub session_id: Uuid,
    /// Monotonically increasing position within the session.
    pub sequence_number: i64,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all telemetry events implement.
pub trait TelemetryEvent: Send + Sync + std::fmt::Debug {
    /// Returns the stable event name.
    fn event_name(&self) -> &'static str;

    /// Serializes the event parameters to JSON.
    fn to_params(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
