//! Game state owned by a single player session.

use std::sync::Arc;

use branchline_content::domain::scene::Scene;
use branchline_content::domain::spec::GameSpec;
use branchline_core::meter::Meters;
use serde::{Deserialize, Serialize};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Nothing loaded yet.
    #[default]
    Idle,
    /// Content fetch in flight.
    Loading,
    /// Playing.
    Ready,
    /// A result scene has been reached.
    Completed,
    /// Content could not be loaded.
    Error,
}

/// Snapshot of one playthrough.
///
/// Only the reducer in [`crate::domain::machine`] produces new states; the
/// presentation layer reads them through the accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameState {
    pub(crate) status: GameStatus,
    pub(crate) spec: Option<Arc<GameSpec>>,
    pub(crate) scene_id: Option<String>,
    pub(crate) meters: Meters,
    pub(crate) last_feedback: Option<String>,
    pub(crate) error: Option<String>,
}

impl GameState {
    /// A fresh, idle state with initial meters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Loaded content, if any.
    #[must_use]
    pub fn spec(&self) -> Option<&Arc<GameSpec>> {
        self.spec.as_ref()
    }

    /// Identifier of the current scene.
    #[must_use]
    pub fn scene_id(&self) -> Option<&str> {
        self.scene_id.as_deref()
    }

    /// The current scene, when both content and a scene id are present and
    /// the id resolves.
    #[must_use]
    pub fn current_scene(&self) -> Option<&Scene> {
        let spec = self.spec.as_ref()?;
        spec.scene(self.scene_id.as_deref()?)
    }

    /// Current meter values.
    #[must_use]
    pub fn meters(&self) -> &Meters {
        &self.meters
    }

    /// Feedback attached to the most recent transition.
    #[must_use]
    pub fn last_feedback(&self) -> Option<&str> {
        self.last_feedback.as_deref()
    }

    /// Message of the last load failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` once a result scene has been reached.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}
