//! Actions the presentation layer and the loader dispatch into the reducer.

use std::sync::Arc;

use branchline_content::domain::spec::GameSpec;
use branchline_core::meter::Effect;

use super::scoring::TriageScore;

/// Outcome of a submitted minigame, as fed to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinigameCompletion {
    /// Scene entered next.
    pub next: String,
    /// Meter deltas earned.
    pub effect: Effect,
    /// Text shown to the player.
    pub feedback: Option<String>,
    /// Raw score, reported to telemetry when present.
    pub score: Option<TriageScore>,
}

/// Every input the game state machine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Content fetch started.
    LoadStart,
    /// Content fetched and decoded.
    LoadSuccess(Arc<GameSpec>),
    /// Content fetch failed.
    LoadError(String),
    /// Begin (or restart) the run with fresh meters.
    Start,
    /// Take a choice from the current scene.
    Choose {
        /// Identifier of the choice, scoped to the current scene.
        choice_id: String,
    },
    /// A minigame was submitted.
    MinigameComplete(MinigameCompletion),
}

impl GameAction {
    /// Convenience constructor for [`GameAction::Choose`].
    #[must_use]
    pub fn choose(choice_id: impl Into<String>) -> Self {
        GameAction::Choose {
            choice_id: choice_id.into(),
        }
    }

    /// The type name for this action (for logging).
    #[must_use]
    pub fn action_type(&self) -> &'static str {
        match self {
            GameAction::LoadStart => "load_start",
            GameAction::LoadSuccess(_) => "load_success",
            GameAction::LoadError(_) => "load_error",
            GameAction::Start => "start",
            GameAction::Choose { .. } => "choose",
            GameAction::MinigameComplete(_) => "minigame_complete",
        }
    }
}
