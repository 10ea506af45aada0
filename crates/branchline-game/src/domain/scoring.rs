//! Triage minigame scoring.
//!
//! Pure functions from a player's ticket assignment to a score and the
//! growth reward derived from it.

use std::collections::HashMap;

use branchline_content::domain::scene::{MinigameScene, Priority, TriageTicket};
use branchline_core::meter::{Effect, Meter};
use serde::{Deserialize, Serialize};

use super::actions::{GameAction, MinigameCompletion};

/// Largest growth reward a perfect triage earns.
pub const MAX_GROWTH_REWARD: u32 = 20;

/// Player's priority per ticket id.
pub type Assignment = HashMap<String, Priority>;

/// Correct classifications out of the tickets on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageScore {
    /// Tickets whose assignment matches their correct priority.
    pub correct: u32,
    /// Tickets on the board.
    pub total: u32,
}

impl TriageScore {
    /// Growth reward: `round(correct / total * 20)`, half rounding up.
    ///
    /// An empty board earns nothing.
    #[must_use]
    pub fn growth_delta(&self) -> i32 {
        if self.total == 0 {
            return 0;
        }
        let correct = u64::from(self.correct.min(self.total));
        let total = u64::from(self.total);
        let reward = (2 * correct * u64::from(MAX_GROWTH_REWARD) + total) / (2 * total);
        i32::try_from(reward).unwrap_or(i32::MAX)
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Counts tickets whose assigned priority equals their correct one.
///
/// Unassigned tickets count as wrong; assignments for unknown ticket ids are
/// ignored.
#[must_use]
pub fn score_triage(tickets: &[TriageTicket], assignment: &Assignment) -> TriageScore {
    let correct = tickets
        .iter()
        .filter(|ticket| assignment.get(&ticket.id) == Some(&ticket.correct))
        .count();
    TriageScore {
        correct: count(correct),
        total: count(tickets.len()),
    }
}

/// Feedback line shown after a triage submission.
#[must_use]
pub fn triage_feedback(score: TriageScore, growth_delta: i32) -> String {
    format!(
        "Priority triage: {}/{} correct (growth +{growth_delta})",
        score.correct, score.total
    )
}

/// Score, reward and feedback of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageOutcome {
    /// Raw score.
    pub score: TriageScore,
    /// Growth meter reward.
    pub growth_delta: i32,
    /// Feedback line.
    pub feedback: String,
}

impl TriageOutcome {
    /// Derives reward and feedback from a score.
    #[must_use]
    pub fn from_score(score: TriageScore) -> Self {
        let growth_delta = score.growth_delta();
        Self {
            score,
            growth_delta,
            feedback: triage_feedback(score, growth_delta),
        }
    }

    /// Meter effect of the outcome. Always mentions growth, even at zero.
    #[must_use]
    pub fn effect(&self) -> Effect {
        Effect::new().with(Meter::Growth, self.growth_delta)
    }

    /// The `minigame_complete` action moving the player to `next`.
    #[must_use]
    pub fn into_action(self, next: impl Into<String>) -> GameAction {
        GameAction::MinigameComplete(MinigameCompletion {
            next: next.into(),
            effect: self.effect(),
            feedback: Some(self.feedback),
            score: Some(self.score),
        })
    }
}

/// Scores a submission against a minigame scene.
#[must_use]
pub fn evaluate_triage(scene: &MinigameScene, assignment: &Assignment) -> TriageOutcome {
    TriageOutcome::from_score(score_triage(&scene.tickets, assignment))
}
