//! Telemetry events produced by game transitions.
//!
//! Parameter names follow the analytics contract consumed downstream and
//! must stay stable.

use branchline_core::event::{EventMetadata, TelemetryEvent};
use branchline_core::meter::Meter;
use serde::{Deserialize, Serialize};

/// Event name for scene views.
pub const PAGE_VIEW: &str = "page_view";
/// Event name for taken choices.
pub const CHOICE_SELECT: &str = "choice_select";
/// Event name for entering a minigame.
pub const MINIGAME_START: &str = "minigame_start";
/// Event name for submitted minigames.
pub const MINIGAME_COMPLETE: &str = "minigame_complete";
/// Event name for meter changes.
pub const METER_UPDATE: &str = "meter_update";
/// Event name for a (re)started run.
pub const GAME_START: &str = "game_start";
/// Event name for a finished run.
pub const GAME_COMPLETE: &str = "game_complete";
/// Event name for the result-screen call to action.
pub const CTA_CLICK: &str = "cta_click";

/// A scene was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewed {
    /// Scene identifier.
    pub scene: String,
}

/// A choice was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSelected {
    /// Scene the choice belongs to.
    pub scene: String,
    /// Choice identifier.
    pub choice_id: String,
    /// Choice label.
    pub label: String,
    /// Target scene.
    pub next: String,
}

/// A minigame scene was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameStarted {
    /// Minigame scene identifier.
    pub scene: String,
}

/// A minigame was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameCompleted {
    /// Minigame scene identifier.
    pub scene: String,
    /// Correctly classified tickets.
    pub score: u32,
    /// Tickets on the board.
    pub total: u32,
}

/// A meter changed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterUpdated {
    /// The meter.
    pub meter: Meter,
    /// Change actually applied, after clamping.
    pub delta: i32,
    /// Resulting value.
    pub value: i32,
}

/// A run started with fresh meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStarted {}

/// A run reached its result scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCompleted {
    /// Sum of all meters.
    pub score_total: i32,
}

/// The result-screen call to action was clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaClicked {
    /// Where on screen the call to action sits.
    pub position: String,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// See [`PageViewed`].
    PageView(PageViewed),
    /// See [`ChoiceSelected`].
    ChoiceSelect(ChoiceSelected),
    /// See [`MinigameStarted`].
    MinigameStart(MinigameStarted),
    /// See [`MinigameCompleted`].
    MinigameComplete(MinigameCompleted),
    /// See [`MeterUpdated`].
    MeterUpdate(MeterUpdated),
    /// See [`GameStarted`].
    GameStart(GameStarted),
    /// See [`GameCompleted`].
    GameComplete(GameCompleted),
    /// See [`CtaClicked`].
    CtaClick(CtaClicked),
}

impl GameEventKind {
    /// Stable event name from the analytics contract.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEventKind::PageView(_) => PAGE_VIEW,
            GameEventKind::ChoiceSelect(_) => CHOICE_SELECT,
            GameEventKind::MinigameStart(_) => MINIGAME_START,
            GameEventKind::MinigameComplete(_) => MINIGAME_COMPLETE,
            GameEventKind::MeterUpdate(_) => METER_UPDATE,
            GameEventKind::GameStart(_) => GAME_START,
            GameEventKind::GameComplete(_) => GAME_COMPLETE,
            GameEventKind::CtaClick(_) => CTA_CLICK,
        }
    }

    /// Flat parameter object for the event.
    #[must_use]
    pub fn params(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        let value = match self {
            GameEventKind::PageView(payload) => serde_json::to_value(payload),
            GameEventKind::ChoiceSelect(payload) => serde_json::to_value(payload),
            GameEventKind::MinigameStart(payload) => serde_json::to_value(payload),
            GameEventKind::MinigameComplete(payload) => serde_json::to_value(payload),
            GameEventKind::MeterUpdate(payload) => serde_json::to_value(payload),
            GameEventKind::GameStart(payload) => serde_json::to_value(payload),
            GameEventKind::GameComplete(payload) => serde_json::to_value(payload),
            GameEventKind::CtaClick(payload) => serde_json::to_value(payload),
        };
        value.expect("GameEventKind serialization is infallible")
    }
}

/// Telemetry event envelope for a game session.
#[derive(Debug, Clone)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl TelemetryEvent for GameEvent {
    fn event_name(&self) -> &'static str {
        self.kind.name()
    }

    fn to_params(&self) -> serde_json::Value {
        self.kind.params()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_choice_select_params_are_flat() {
        let kind = GameEventKind::ChoiceSelect(ChoiceSelected {
            scene: "s1".to_owned(),
            choice_id: "c1".to_owned(),
            label: "Listen".to_owned(),
            next: "s2".to_owned(),
        });

        assert_eq!(kind.name(), "choice_select");
        assert_eq!(
            kind.params(),
            json!({ "scene": "s1", "choice_id": "c1", "label": "Listen", "next": "s2" })
        );
    }

    #[test]
    fn test_meter_update_params_use_meter_name() {
        let kind = GameEventKind::MeterUpdate(MeterUpdated {
            meter: Meter::Growth,
            delta: -5,
            value: 45,
        });

        assert_eq!(
            kind.params(),
            json!({ "meter": "growth", "delta": -5, "value": 45 })
        );
    }

    #[test]
    fn test_game_start_has_empty_params() {
        let kind = GameEventKind::GameStart(GameStarted {});

        assert_eq!(kind.name(), "game_start");
        assert_eq!(kind.params(), json!({}));
    }

    #[test]
    fn test_game_complete_reports_score_total() {
        let kind = GameEventKind::GameComplete(GameCompleted { score_total: 170 });

        assert_eq!(kind.params(), json!({ "score_total": 170 }));
    }
}
