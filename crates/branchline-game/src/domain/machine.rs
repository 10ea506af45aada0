//! The game reducer.
//!
//! `dispatch` is a pure, total function over `(state, action)`. It never
//! panics on malformed content: an action whose preconditions fail yields
//! the input state unchanged together with an [`ActionRejected`] diagnostic.
//! Telemetry is returned as data for the session adapter to deliver.

use std::sync::Arc;

use branchline_content::domain::scene::{Scene, SceneKind};
use branchline_content::domain::spec::GameSpec;
use branchline_core::meter::{Effect, Meter, Meters};
use thiserror::Error;

use super::actions::{GameAction, MinigameCompletion};
use super::events::{
    ChoiceSelected, GameCompleted, GameEventKind, GameStarted, MeterUpdated, MinigameCompleted,
    MinigameStarted, PageViewed,
};
use super::state::{GameState, GameStatus};

/// Why an action left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    /// No content has been loaded.
    #[error("no content loaded")]
    NoSpecLoaded,

    /// Content is loaded but no scene is current.
    #[error("no current scene")]
    NoCurrentScene,

    /// The current scene id does not resolve.
    #[error("current scene '{scene}' does not exist")]
    SceneNotFound {
        /// The dangling scene id.
        scene: String,
    },

    /// The current scene offers no choices.
    #[error("scene '{scene}' of type {kind} offers no choices")]
    SceneNotChoosable {
        /// Current scene.
        scene: String,
        /// Its variant.
        kind: SceneKind,
    },

    /// No available choice has the requested id.
    #[error("scene '{scene}' has no choice '{choice}'")]
    UnknownChoice {
        /// Current scene.
        scene: String,
        /// Requested choice.
        choice: String,
    },

    /// The transition points at a scene that does not exist.
    #[error("target scene '{target}' does not exist")]
    DanglingTarget {
        /// Missing target.
        target: String,
    },
}

/// Result of dispatching one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The next state.
    pub state: GameState,
    /// Telemetry to emit, in order.
    pub events: Vec<GameEventKind>,
    /// Set when the action was a no-op.
    pub rejection: Option<ActionRejected>,
}

impl Transition {
    fn applied(state: GameState, events: Vec<GameEventKind>) -> Self {
        Self {
            state,
            events,
            rejection: None,
        }
    }

    fn rejected(state: &GameState, reason: ActionRejected) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
            rejection: Some(reason),
        }
    }

    /// Returns `true` when the action changed nothing.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// Applies `action` to `state`, returning the next state and its telemetry.
#[must_use]
pub fn dispatch(state: &GameState, action: GameAction) -> Transition {
    match action {
        GameAction::LoadStart => Transition::applied(
            GameState {
                status: GameStatus::Loading,
                error: None,
                ..state.clone()
            },
            Vec::new(),
        ),
        GameAction::LoadSuccess(spec) => load_success(state, spec),
        GameAction::LoadError(message) => Transition::applied(
            GameState {
                status: GameStatus::Error,
                error: Some(message),
                ..state.clone()
            },
            Vec::new(),
        ),
        GameAction::Start => start(state),
        GameAction::Choose { choice_id } => choose(state, &choice_id),
        GameAction::MinigameComplete(completion) => complete_minigame(state, completion),
    }
}

fn load_success(state: &GameState, spec: Arc<GameSpec>) -> Transition {
    let mut events = Vec::new();
    enter_scene(&spec, &spec.start, &mut events);
    Transition::applied(
        GameState {
            status: GameStatus::Ready,
            scene_id: Some(spec.start.clone()),
            spec: Some(spec),
            ..state.clone()
        },
        events,
    )
}

fn start(state: &GameState) -> Transition {
    let Some(spec) = state.spec.as_ref() else {
        return Transition::rejected(state, ActionRejected::NoSpecLoaded);
    };

    let mut events = vec![GameEventKind::GameStart(GameStarted {})];
    enter_scene(spec, &spec.start, &mut events);

    Transition::applied(
        GameState {
            status: GameStatus::Ready,
            scene_id: Some(spec.start.clone()),
            meters: Meters::initial(),
            last_feedback: None,
            ..state.clone()
        },
        events,
    )
}

fn choose(state: &GameState, choice_id: &str) -> Transition {
    let Some(spec) = state.spec.as_ref() else {
        return Transition::rejected(state, ActionRejected::NoSpecLoaded);
    };
    let Some(scene_id) = state.scene_id.as_deref() else {
        return Transition::rejected(state, ActionRejected::NoCurrentScene);
    };
    let Some(scene) = spec.scene(scene_id) else {
        return Transition::rejected(
            state,
            ActionRejected::SceneNotFound {
                scene: scene_id.to_owned(),
            },
        );
    };
    if matches!(scene, Scene::Minigame(_) | Scene::Result(_)) {
        return Transition::rejected(
            state,
            ActionRejected::SceneNotChoosable {
                scene: scene_id.to_owned(),
                kind: scene.kind(),
            },
        );
    }
    let Some(choice) = scene.choosable(choice_id) else {
        return Transition::rejected(
            state,
            ActionRejected::UnknownChoice {
                scene: scene_id.to_owned(),
                choice: choice_id.to_owned(),
            },
        );
    };
    let Some(target) = spec.scene(&choice.next) else {
        return Transition::rejected(
            state,
            ActionRejected::DanglingTarget {
                target: choice.next.clone(),
            },
        );
    };

    let events = vec![GameEventKind::ChoiceSelect(ChoiceSelected {
        scene: scene_id.to_owned(),
        choice_id: choice.id.clone(),
        label: choice.label.clone(),
        next: choice.next.clone(),
    })];

    advance(
        state,
        spec,
        (choice.next.as_str(), target),
        &choice.effect,
        choice.feedback.clone(),
        events,
    )
}

fn complete_minigame(state: &GameState, completion: MinigameCompletion) -> Transition {
    let Some(spec) = state.spec.as_ref() else {
        return Transition::rejected(state, ActionRejected::NoSpecLoaded);
    };
    let Some(target) = spec.scene(&completion.next) else {
        return Transition::rejected(
            state,
            ActionRejected::DanglingTarget {
                target: completion.next,
            },
        );
    };

    let mut events = Vec::new();
    if let Some(score) = completion.score {
        events.push(GameEventKind::MinigameComplete(MinigameCompleted {
            scene: state.scene_id.clone().unwrap_or_default(),
            score: score.correct,
            total: score.total,
        }));
    }

    advance(
        state,
        spec,
        (completion.next.as_str(), target),
        &completion.effect,
        completion.feedback,
        events,
    )
}

/// Moves to `target` (keyed by `target_id`), applying `effect` and recording
/// `feedback`.
fn advance(
    state: &GameState,
    spec: &GameSpec,
    (target_id, target): (&str, &Scene),
    effect: &Effect,
    feedback: Option<String>,
    mut events: Vec<GameEventKind>,
) -> Transition {
    let meters = state.meters.apply_effect(effect);
    meter_updates(&state.meters, &meters, effect, &mut events);

    enter_scene(spec, target_id, &mut events);

    let status = if target.is_terminal() {
        GameStatus::Completed
    } else {
        state.status
    };
    if status == GameStatus::Completed && state.status != GameStatus::Completed {
        events.push(GameEventKind::GameComplete(GameCompleted {
            score_total: meters.total(),
        }));
    }

    Transition::applied(
        GameState {
            status,
            scene_id: Some(target_id.to_owned()),
            meters,
            last_feedback: feedback,
            ..state.clone()
        },
        events,
    )
}

/// One `meter_update` per meter in `effect` whose value actually moved.
fn meter_updates(
    before: &Meters,
    after: &Meters,
    effect: &Effect,
    events: &mut Vec<GameEventKind>,
) {
    let touched: Vec<Meter> = effect.iter().map(|(meter, _)| meter).collect();
    for meter in touched {
        let delta = after.get(meter) - before.get(meter);
        if delta != 0 {
            events.push(GameEventKind::MeterUpdate(MeterUpdated {
                meter,
                delta,
                value: after.get(meter),
            }));
        }
    }
}

fn enter_scene(spec: &GameSpec, scene_id: &str, events: &mut Vec<GameEventKind>) {
    events.push(GameEventKind::PageView(PageViewed {
        scene: scene_id.to_owned(),
    }));
    if let Some(Scene::Minigame(_)) = spec.scene(scene_id) {
        events.push(GameEventKind::MinigameStart(MinigameStarted {
            scene: scene_id.to_owned(),
        }));
    }
}
