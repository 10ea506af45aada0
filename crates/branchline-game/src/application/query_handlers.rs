//! Read-only views of a session for the presentation layer.
//!
//! Views carry only what a screen renders. Triage tickets never expose
//! their correct priority.

use branchline_content::domain::scene::{Scene, SceneKind};
use branchline_core::meter::Meters;
use serde::Serialize;

use super::session::GameSession;
use crate::domain::state::{GameState, GameStatus};

/// A selectable choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Choice identifier to send back with `choose`.
    pub id: String,
    /// Button label.
    pub label: String,
}

/// A ticket on the triage board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    /// Ticket identifier.
    pub id: String,
    /// Ticket title.
    pub title: String,
    /// Optional hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// The scene to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneView {
    /// Scene identifier.
    pub id: String,
    /// Scene variant.
    pub kind: SceneKind,
    /// Heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Choices the player can take. A text scene offers at most one.
    pub choices: Vec<ChoiceView>,
    /// Tickets to classify, for minigame scenes.
    pub tickets: Vec<TicketView>,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStateView {
    /// Lifecycle status.
    pub status: GameStatus,
    /// Current scene, when one resolves.
    pub scene: Option<SceneView>,
    /// Meter values.
    pub meters: Meters,
    /// Sum of the meters.
    pub score_total: i32,
    /// Feedback from the last transition.
    pub feedback: Option<String>,
    /// Load failure message.
    pub error: Option<String>,
}

fn scene_view(scene_id: &str, scene: &Scene) -> SceneView {
    let tickets = match scene {
        Scene::Minigame(minigame) => minigame
            .tickets
            .iter()
            .map(|ticket| TicketView {
                id: ticket.id.clone(),
                title: ticket.title.clone(),
                hint: ticket.hint.clone(),
            })
            .collect(),
        _ => Vec::new(),
    };
    SceneView {
        id: scene_id.to_owned(),
        kind: scene.kind(),
        title: scene.title().map(str::to_owned),
        body: scene.body().map(str::to_owned),
        choices: scene
            .available_choices()
            .iter()
            .map(|choice| ChoiceView {
                id: choice.id.clone(),
                label: choice.label.clone(),
            })
            .collect(),
        tickets,
    }
}

/// Builds the render view of `state`.
#[must_use]
pub fn view_state(state: &GameState) -> GameStateView {
    let scene = state
        .scene_id()
        .zip(state.current_scene())
        .map(|(scene_id, scene)| scene_view(scene_id, scene));
    GameStateView {
        status: state.status(),
        scene,
        meters: *state.meters(),
        score_total: state.meters().total(),
        feedback: state.last_feedback().map(str::to_owned),
        error: state.error().map(str::to_owned),
    }
}

/// Builds the render view of a session.
#[must_use]
pub fn view_session(session: &GameSession) -> GameStateView {
    view_state(session.state())
}
