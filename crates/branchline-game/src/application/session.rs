//! A single player session.
//!
//! `GameSession` is the boundary between the pure reducer and the outside
//! world: it owns the one `GameState` of the session, runs the content load,
//! logs rejected actions and forwards telemetry. Each session is an
//! independent value; there is no process-wide game state.

use std::future::Future;
use std::sync::Arc;

use branchline_content::application::loader::SpecLoader;
use branchline_content::domain::scene::Scene;
use branchline_content::domain::validation::validate;
use branchline_core::meter::Meters;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::telemetry::TelemetryDispatcher;
use crate::domain::actions::GameAction;
use crate::domain::events::{CtaClicked, GameEventKind};
use crate::domain::machine::dispatch;
use crate::domain::scoring::{Assignment, TriageOutcome, evaluate_triage};
use crate::domain::state::GameState;

/// How a content load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Content arrived and the session is ready.
    Loaded,
    /// The fetch failed; the session is in `error` status.
    Failed(String),
    /// The load was cancelled; nothing past `load_start` was applied.
    Cancelled,
}

/// Final meters handed to whatever follows the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    /// Meter values at completion.
    pub meters: Meters,
    /// Their sum.
    pub score_total: i32,
}

/// One player's playthrough.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    state: GameState,
    telemetry: TelemetryDispatcher,
}

impl GameSession {
    /// Creates an idle session reporting through `telemetry`.
    #[must_use]
    pub fn new(telemetry: TelemetryDispatcher) -> Self {
        Self {
            id: telemetry.session_id(),
            state: GameState::new(),
            telemetry,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The scene to render, if any.
    #[must_use]
    pub fn current_scene(&self) -> Option<&Scene> {
        self.state.current_scene()
    }

    /// Applies one action and queues its telemetry.
    ///
    /// Rejected actions leave the state untouched and are logged.
    #[instrument(skip(self, action), fields(session_id = %self.id, action = action.action_type()))]
    pub fn dispatch(&mut self, action: GameAction) -> &GameState {
        let transition = dispatch(&self.state, action);
        if let Some(rejection) = &transition.rejection {
            warn!(%rejection, scene_id = ?self.state.scene_id(), "action ignored");
        } else {
            debug!(
                status = ?transition.state.status(),
                scene_id = ?transition.state.scene_id(),
                "transition applied"
            );
        }
        self.telemetry.emit_all(transition.events);
        self.state = transition.state;
        &self.state
    }

    /// Fetches content, racing the fetch against `cancelled`.
    ///
    /// `cancelled` is any future that completes on cancellation, typically a
    /// `tokio::sync::oneshot::Receiver` (which also completes when its sender
    /// is dropped). `load_start` is applied immediately. If `cancelled`
    /// resolves first,
    /// neither `load_success` nor `load_error` is applied. Dropping the
    /// returned future has the same effect.
    #[instrument(skip_all, fields(session_id = %self.id))]
    pub async fn load<C>(&mut self, loader: &dyn SpecLoader, cancelled: C) -> LoadOutcome
    where
        C: Future,
    {
        self.dispatch(GameAction::LoadStart);

        let fetched = tokio::select! {
            biased;
            _ = cancelled => {
                info!("content load cancelled");
                return LoadOutcome::Cancelled;
            }
            result = loader.fetch() => result,
        };

        match fetched {
            Ok(spec) => {
                for defect in validate(&spec) {
                    warn!(%defect, "content defect");
                }
                info!(
                    start = %spec.start,
                    scenes = spec.scenes.len(),
                    fingerprint = %spec.fingerprint(),
                    "content loaded"
                );
                self.dispatch(GameAction::LoadSuccess(Arc::new(spec)));
                LoadOutcome::Loaded
            }
            Err(err) => {
                let message = err.to_string();
                error!(error = %message, "content load failed");
                self.dispatch(GameAction::LoadError(message.clone()));
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Fetches content with no cancellation signal.
    pub async fn load_to_completion(&mut self, loader: &dyn SpecLoader) -> LoadOutcome {
        self.load(loader, std::future::pending::<()>()).await
    }

    /// Begins or restarts the run with fresh meters.
    pub fn restart(&mut self) -> &GameState {
        self.dispatch(GameAction::Start)
    }

    /// Takes a choice from the current scene.
    pub fn choose(&mut self, choice_id: &str) -> &GameState {
        self.dispatch(GameAction::choose(choice_id))
    }

    /// Scores `assignment` against the current minigame and moves on.
    ///
    /// Returns `None`, leaving the state untouched, when the current scene is
    /// not a minigame.
    pub fn submit_triage(&mut self, assignment: &Assignment) -> Option<TriageOutcome> {
        let (next, outcome) = match self.current_scene() {
            Some(Scene::Minigame(minigame)) => {
                (minigame.next.clone(), evaluate_triage(minigame, assignment))
            }
            _ => {
                warn!(session_id = %self.id, "triage submitted outside a minigame scene");
                return None;
            }
        };
        self.dispatch(outcome.clone().into_action(next));
        Some(outcome)
    }

    /// Records a click on the result-screen call to action.
    pub fn record_cta(&mut self, position: &str) {
        self.telemetry.emit(GameEventKind::CtaClick(CtaClicked {
            position: position.to_owned(),
        }));
    }

    /// Final meters and their total, once the run is completed.
    #[must_use]
    pub fn result_summary(&self) -> Option<ResultSummary> {
        self.state.is_completed().then(|| ResultSummary {
            meters: *self.state.meters(),
            score_total: self.state.meters().total(),
        })
    }
}
