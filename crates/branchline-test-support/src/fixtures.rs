//! Content fixtures shared by game and API tests.

use branchline_content::domain::spec::GameSpec;

/// `s1` (choices) offers `c1` with `customer +10` into the result scene `s2`.
pub const TWO_SCENE_JSON: &str = r#"{
    "start": "s1",
    "scenes": {
        "s1": {
            "id": "s1", "type": "choices", "title": "First call",
            "choices": [
                { "id": "c1", "label": "Pick up", "next": "s2", "effect": { "customer": 10 } }
            ]
        },
        "s2": { "id": "s2", "type": "result", "title": "Done" }
    }
}"#;

/// A short run through every scene type:
/// `welcome` (text) -> `standup` (choices) -> `triage` (minigame) -> `wrap` (result).
pub const TRIAGE_RUN_JSON: &str = r#"{
    "start": "welcome",
    "scenes": {
        "welcome": {
            "id": "welcome", "type": "text", "title": "Monday",
            "body": "Your first week as support lead.",
            "choices": [ { "id": "continue", "label": "Continue", "next": "standup" } ]
        },
        "standup": {
            "id": "standup", "type": "choices", "title": "Stand-up",
            "choices": [
                { "id": "listen", "label": "Listen first", "next": "triage",
                  "effect": { "team": 10 }, "feedback": "The team feels heard." },
                { "id": "push", "label": "Push the roadmap", "next": "triage",
                  "effect": { "team": -10, "growth": 5 } }
            ]
        },
        "triage": {
            "id": "triage", "type": "minigame", "title": "Inbox triage", "next": "wrap",
            "tickets": [
                { "id": "t1", "title": "Checkout is down", "correct": "P1" },
                { "id": "t2", "title": "Invoice typo", "hint": "Cosmetic", "correct": "P3" },
                { "id": "t3", "title": "Slow search", "correct": "P2" },
                { "id": "t4", "title": "Login loop for one user", "correct": "P2" }
            ]
        },
        "wrap": { "id": "wrap", "type": "result", "title": "Week one done" }
    }
}"#;

/// Parses [`TWO_SCENE_JSON`].
///
/// # Panics
///
/// Panics if the fixture no longer parses.
#[must_use]
pub fn two_scene_spec() -> GameSpec {
    GameSpec::from_json_str(TWO_SCENE_JSON).expect("two-scene fixture parses")
}

/// Parses [`TRIAGE_RUN_JSON`].
///
/// # Panics
///
/// Panics if the fixture no longer parses.
#[must_use]
pub fn triage_run_spec() -> GameSpec {
    GameSpec::from_json_str(TRIAGE_RUN_JSON).expect("triage fixture parses")
}
