//! Referential-integrity checks over a content document.
//!
//! Defects are authoring mistakes, not runtime failures: the player still
//! runs malformed content and stalls where a reference dangles. Validation
//! exists so those stalls are caught before a player hits them.

use std::collections::{BTreeSet, HashSet, VecDeque};

use thiserror::Error;

use super::scene::{Scene, SceneKind};
use super::spec::GameSpec;

/// An authoring defect found in a content document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentDefect {
    /// `start` names a scene that does not exist.
    #[error("start scene '{start}' does not exist")]
    MissingStartScene {
        /// The dangling start reference.
        start: String,
    },

    /// A scene is stored under a key different from its own `id`.
    #[error("scene stored under '{key}' declares id '{id}'")]
    SceneIdMismatch {
        /// Map key.
        key: String,
        /// Declared identifier.
        id: String,
    },

    /// A choice points at a scene that does not exist.
    #[error("choice '{choice}' in scene '{scene}' targets missing scene '{target}'")]
    DanglingChoiceTarget {
        /// Owning scene.
        scene: String,
        /// Offending choice.
        choice: String,
        /// Missing target.
        target: String,
    },

    /// A minigame's successor does not exist.
    #[error("minigame '{scene}' continues to missing scene '{target}'")]
    DanglingMinigameTarget {
        /// Minigame scene.
        scene: String,
        /// Missing target.
        target: String,
    },

    /// A choices scene offers nothing to choose.
    #[error("choices scene '{scene}' has no choices")]
    EmptyChoices {
        /// Offending scene.
        scene: String,
    },

    /// A text scene authors choices beyond the continue action.
    #[error("text scene '{scene}' ignores {ignored} choice(s) after the first")]
    IgnoredTextChoices {
        /// Offending scene.
        scene: String,
        /// Number of unused choices.
        ignored: usize,
    },

    /// Two choices in one scene share an identifier.
    #[error("scene '{scene}' repeats choice id '{choice}'")]
    DuplicateChoiceId {
        /// Owning scene.
        scene: String,
        /// Repeated identifier.
        choice: String,
    },

    /// Two tickets in one minigame share an identifier.
    #[error("minigame '{scene}' repeats ticket id '{ticket}'")]
    DuplicateTicketId {
        /// Owning scene.
        scene: String,
        /// Repeated identifier.
        ticket: String,
    },

    /// A minigame has no tickets to classify.
    #[error("minigame '{scene}' has no tickets")]
    EmptyMinigame {
        /// Offending scene.
        scene: String,
    },

    /// A scene cannot be reached from the start scene.
    #[error("scene '{scene}' is unreachable from the start scene")]
    UnreachableScene {
        /// Orphaned scene.
        scene: String,
    },

    /// No result scene is reachable, so the game can never complete.
    #[error("no result scene is reachable from the start scene")]
    NoReachableResult,
}

/// Identifiers of every existing scene reachable from `start`, in
/// breadth-first order.
#[must_use]
pub fn reachable_scenes(spec: &GameSpec) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    if spec.scenes.contains_key(&spec.start) {
        queue.push_back(spec.start.as_str());
        seen.insert(spec.start.as_str());
    }

    while let Some(scene_id) = queue.pop_front() {
        order.push(scene_id);
        let Some(scene) = spec.scene(scene_id) else {
            continue;
        };
        for next in scene.successors() {
            if spec.scenes.contains_key(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    order
}

/// Checks a document for authoring defects.
///
/// An empty result means every reference resolves, every scene is reachable
/// and at least one result scene can be reached.
#[must_use]
pub fn validate(spec: &GameSpec) -> Vec<ContentDefect> {
    let mut defects = Vec::new();

    if !spec.scenes.contains_key(&spec.start) {
        defects.push(ContentDefect::MissingStartScene {
            start: spec.start.clone(),
        });
    }

    for (key, scene) in &spec.scenes {
        if scene.id() != key {
            defects.push(ContentDefect::SceneIdMismatch {
                key: key.clone(),
                id: scene.id().to_owned(),
            });
        }
        check_scene(spec, key, scene, &mut defects);
    }

    let reachable: BTreeSet<&str> = reachable_scenes(spec).into_iter().collect();
    if spec.scenes.contains_key(&spec.start) {
        for key in spec.scenes.keys() {
            if !reachable.contains(key.as_str()) {
                defects.push(ContentDefect::UnreachableScene { scene: key.clone() });
            }
        }
        let completes = reachable
            .iter()
            .filter_map(|scene_id| spec.scene(scene_id))
            .any(|scene| scene.kind() == SceneKind::Result);
        if !completes {
            defects.push(ContentDefect::NoReachableResult);
        }
    }

    defects
}

fn check_scene(spec: &GameSpec, key: &str, scene: &Scene, defects: &mut Vec<ContentDefect>) {
    let mut choice_ids = HashSet::new();
    for choice in scene.authored_choices() {
        if !choice_ids.insert(choice.id.as_str()) {
            defects.push(ContentDefect::DuplicateChoiceId {
                scene: key.to_owned(),
                choice: choice.id.clone(),
            });
        }
        if !spec.scenes.contains_key(&choice.next) {
            defects.push(ContentDefect::DanglingChoiceTarget {
                scene: key.to_owned(),
                choice: choice.id.clone(),
                target: choice.next.clone(),
            });
        }
    }

    match scene {
        Scene::Text(text) if text.choices.len() > 1 => {
            defects.push(ContentDefect::IgnoredTextChoices {
                scene: key.to_owned(),
                ignored: text.choices.len() - 1,
            });
        }
        Scene::Choices(choices) if choices.choices.is_empty() => {
            defects.push(ContentDefect::EmptyChoices {
                scene: key.to_owned(),
            });
        }
        Scene::Minigame(minigame) => {
            if !spec.scenes.contains_key(&minigame.next) {
                defects.push(ContentDefect::DanglingMinigameTarget {
                    scene: key.to_owned(),
                    target: minigame.next.clone(),
                });
            }
            if minigame.tickets.is_empty() {
                defects.push(ContentDefect::EmptyMinigame {
                    scene: key.to_owned(),
                });
            }
            let mut ticket_ids = HashSet::new();
            for ticket in &minigame.tickets {
                if !ticket_ids.insert(ticket.id.as_str()) {
                    defects.push(ContentDefect::DuplicateTicketId {
                        scene: key.to_owned(),
                        ticket: ticket.id.clone(),
                    });
                }
            }
        }
        _ => {}
    }
}
