//! Fire-and-forget telemetry delivery.
//!
//! Transitions hand their events to a `TelemetryDispatcher`, which wraps
//! them in an envelope and pushes them into an unbounded channel. A
//! background task drains the channel into the configured sink. Sending
//! never blocks and delivery failures only produce a log line.

use std::sync::Arc;

use async_trait::async_trait;
use branchline_core::clock::Clock;
use branchline_core::error::TelemetryError;
use branchline_core::event::{EventMetadata, TelemetryEvent};
use branchline_core::sink::{RecordedEvent, TelemetrySink};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::events::{GameEvent, GameEventKind};

/// Flattens an envelope into the shape sinks receive.
fn to_recorded_event(event: &GameEvent) -> RecordedEvent {
    let meta = event.metadata();
    RecordedEvent {
        event_id: meta.event_id,
        session_id: meta.session_id,
        name: event.event_name().to_owned(),
        params: event.to_params(),
        sequence_number: meta.sequence_number,
        occurred_at: meta.occurred_at,
    }
}

/// Session-scoped telemetry front end.
pub struct TelemetryDispatcher {
    session_id: Uuid,
    clock: Arc<dyn Clock>,
    sender: Option<mpsc::UnboundedSender<RecordedEvent>>,
    sequence: i64,
}

impl std::fmt::Debug for TelemetryDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryDispatcher")
            .field("session_id", &self.session_id)
            .field("enabled", &self.is_enabled())
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl TelemetryDispatcher {
    /// Starts a delivery task feeding `sink` and returns the dispatcher with
    /// the task handle. The task ends once the dispatcher is dropped and the
    /// queue has drained.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn spawn(
        session_id: Uuid,
        sink: Arc<dyn TelemetrySink>,
        clock: Arc<dyn Clock>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(deliver(receiver, sink));
        let dispatcher = Self {
            session_id,
            clock,
            sender: Some(sender),
            sequence: 0,
        };
        (dispatcher, handle)
    }

    /// A dispatcher that drops every event.
    #[must_use]
    pub fn disabled(session_id: Uuid, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_id,
            clock,
            sender: None,
            sequence: 0,
        }
    }

    /// Session the events are attributed to.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns `true` when events are forwarded to a sink.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sender
            .as_ref()
            .is_some_and(|sender| !sender.is_closed())
    }

    /// Queues one event. Never blocks, never fails.
    pub fn emit(&mut self, kind: GameEventKind) {
        self.sequence += 1;
        let Some(sender) = self.sender.as_ref() else {
            return;
        };
        let event = GameEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_name: kind.name().to_owned(),
                session_id: self.session_id,
                sequence_number: self.sequence,
                occurred_at: self.clock.now(),
            },
            kind,
        };
        if sender.send(to_recorded_event(&event)).is_err() {
            warn!(session_id = %self.session_id, "telemetry queue closed; dropping events");
            self.sender = None;
        }
    }

    /// Queues events in order.
    pub fn emit_all(&mut self, kinds: impl IntoIterator<Item = GameEventKind>) {
        for kind in kinds {
            self.emit(kind);
        }
    }
}

async fn deliver(
    mut receiver: mpsc::UnboundedReceiver<RecordedEvent>,
    sink: Arc<dyn TelemetrySink>,
) {
    while let Some(event) = receiver.recv().await {
        let name = event.name.clone();
        let sequence = event.sequence_number;
        if let Err(error) = sink.record(event).await {
            warn!(%error, event = %name, sequence, "telemetry delivery failed");
        }
    }
}

/// Sink that writes each event as a structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetrySink;

#[async_trait]
impl TelemetrySink for TracingTelemetrySink {
    async fn record(&self, event: RecordedEvent) -> Result<(), TelemetryError> {
        info!(
            target: "branchline::telemetry",
            event = %event.name,
            session_id = %event.session_id,
            sequence = event.sequence_number,
            params = %event.params,
            "telemetry"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::domain::events::{GameCompleted, PageViewed};
    use branchline_test_support::{FailingTelemetrySink, FixedClock, RecordingTelemetrySink};

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()))
    }

    fn page_view(scene: &str) -> GameEventKind {
        GameEventKind::PageView(PageViewed {
            scene: scene.to_owned(),
        })
    }

    #[tokio::test]
    async fn test_emitted_events_reach_sink_in_order() {
        // Arrange
        let session_id = Uuid::new_v4();
        let sink = Arc::new(RecordingTelemetrySink::new());
        let (mut dispatcher, handle) =
            TelemetryDispatcher::spawn(session_id, sink.clone(), fixed_clock());

        // Act
        dispatcher.emit(page_view("s1"));
        dispatcher.emit(GameEventKind::GameComplete(GameCompleted { score_total: 160 }));
        drop(dispatcher);
        handle.await.unwrap();

        // Assert
        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].name, "page_view");
        assert_eq!(recorded[0].params, json!({ "scene": "s1" }));
        assert_eq!(recorded[0].sequence_number, 1);
        assert_eq!(recorded[0].session_id, session_id);
        assert_eq!(
            recorded[0].occurred_at,
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
        );
        assert_eq!(recorded[1].name, "game_complete");
        assert_eq!(recorded[1].sequence_number, 2);
        assert_ne!(recorded[0].event_id, recorded[1].event_id);
    }

    #[tokio::test]
    async fn test_failing_sink_is_swallowed() {
        // Arrange
        let (mut dispatcher, handle) = TelemetryDispatcher::spawn(
            Uuid::new_v4(),
            Arc::new(FailingTelemetrySink),
            fixed_clock(),
        );

        // Act
        dispatcher.emit_all([page_view("a"), page_view("b")]);
        drop(dispatcher);

        // Assert
        assert!(handle.await.is_ok());
    }

    #[test]
    fn test_disabled_dispatcher_drops_events_without_runtime() {
        let mut dispatcher = TelemetryDispatcher::disabled(Uuid::new_v4(), fixed_clock());

        dispatcher.emit(page_view("a"));

        assert!(!dispatcher.is_enabled());
        assert_eq!(dispatcher.sequence, 1);
    }

    #[tokio::test]
    async fn test_tracing_sink_accepts_events() {
        let sink = TracingTelemetrySink;
        let event = RecordedEvent {
            event_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            name: "cta_click".to_owned(),
            params: json!({ "position": "result" }),
            sequence_number: 1,
            occurred_at: Utc::now(),
        };

        assert!(sink.record(event).await.is_ok());
    }
}
