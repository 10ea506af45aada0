//! Scene graph nodes and edges.

use std::fmt;

use branchline_core::meter::Effect;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A labeled edge from a scene to its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Identifier, unique within the owning scene.
    pub id: String,
    /// Text shown on the button.
    pub label: String,
    /// Target scene identifier.
    pub next: String,
    /// Meter deltas applied when the choice is taken.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Effect::is_empty"
    )]
    pub effect: Effect,
    /// Hint shown after the choice is taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Priority label a triage ticket can be sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Drop everything.
    P1,
    /// Handle soon.
    P2,
    /// Backlog.
    P3,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::P1, Priority::P2, Priority::P3];

    /// Label used in content and on screen.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card of the triage minigame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageTicket {
    /// Identifier, unique within the minigame.
    pub id: String,
    /// Short description of the incident.
    pub title: String,
    /// Optional nudge shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// The priority the ticket should be sorted into.
    pub correct: Priority,
}

/// Narrative beat with a single continue action.
///
/// Only the first authored choice is meaningful; any further entries are
/// ignored by the player and reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextScene {
    /// Scene identifier.
    pub id: String,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Authored choices; the first is the continue action.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub choices: Vec<Choice>,
}

impl TextScene {
    /// The continue action, if one was authored.
    #[must_use]
    pub fn continue_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }
}

/// Decision point where every choice is a real branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicesScene {
    /// Scene identifier.
    pub id: String,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// The branches on offer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,
}

/// Triage classification minigame with an unconditional successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameScene {
    /// Scene identifier.
    pub id: String,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Scene entered after submission.
    pub next: String,
    /// Tickets to classify.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tickets: Vec<TriageTicket>,
}

/// Terminal scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultScene {
    /// Scene identifier.
    pub id: String,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Discriminator of a scene variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// See [`TextScene`].
    Text,
    /// See [`ChoicesScene`].
    Choices,
    /// See [`MinigameScene`].
    Minigame,
    /// See [`ResultScene`].
    Result,
}

impl SceneKind {
    /// Wire name of the variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Text => "text",
            SceneKind::Choices => "choices",
            SceneKind::Minigame => "minigame",
            SceneKind::Result => "result",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the scene graph, keyed on the `type` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scene {
    /// Narrative beat.
    Text(TextScene),
    /// Decision point.
    Choices(ChoicesScene),
    /// Triage minigame.
    Minigame(MinigameScene),
    /// Terminal result screen.
    Result(ResultScene),
}

impl Scene {
    /// Scene identifier as authored inside the node.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Scene::Text(scene) => &scene.id,
            Scene::Choices(scene) => &scene.id,
            Scene::Minigame(scene) => &scene.id,
            Scene::Result(scene) => &scene.id,
        }
    }

    /// Optional heading.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Scene::Text(scene) => scene.title.as_deref(),
            Scene::Choices(scene) => scene.title.as_deref(),
            Scene::Minigame(scene) => scene.title.as_deref(),
            Scene::Result(scene) => scene.title.as_deref(),
        }
    }

    /// Optional body copy.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Scene::Text(scene) => scene.body.as_deref(),
            Scene::Choices(scene) => scene.body.as_deref(),
            Scene::Minigame(scene) => scene.body.as_deref(),
            Scene::Result(scene) => scene.body.as_deref(),
        }
    }

    /// Variant discriminator.
    #[must_use]
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Text(_) => SceneKind::Text,
            Scene::Choices(_) => SceneKind::Choices,
            Scene::Minigame(_) => SceneKind::Minigame,
            Scene::Result(_) => SceneKind::Result,
        }
    }

    /// Returns `true` for result scenes.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Scene::Result(_))
    }

    /// Every authored choice, including ones a text scene ignores.
    #[must_use]
    pub fn authored_choices(&self) -> &[Choice] {
        match self {
            Scene::Text(scene) => &scene.choices,
            Scene::Choices(scene) => &scene.choices,
            Scene::Minigame(_) | Scene::Result(_) => &[],
        }
    }

    /// Choices the player can actually take here.
    #[must_use]
    pub fn available_choices(&self) -> &[Choice] {
        match self {
            Scene::Text(scene) => &scene.choices[..scene.choices.len().min(1)],
            Scene::Choices(scene) => &scene.choices,
            Scene::Minigame(_) | Scene::Result(_) => &[],
        }
    }

    /// Looks up a choice the player may take from this scene.
    ///
    /// Text scenes only accept their first choice; minigame and result scenes
    /// accept none.
    #[must_use]
    pub fn choosable(&self, choice_id: &str) -> Option<&Choice> {
        self.available_choices()
            .iter()
            .find(|choice| choice.id == choice_id)
    }

    /// Identifiers of the scenes the player can move to from here.
    #[must_use]
    pub fn successors(&self) -> Vec<&str> {
        match self {
            Scene::Minigame(scene) => vec![scene.next.as_str()],
            _ => self
                .available_choices()
                .iter()
                .map(|choice| choice.next.as_str())
                .collect(),
        }
    }
}
