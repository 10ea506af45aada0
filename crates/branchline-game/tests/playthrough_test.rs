//! Integration tests driving the reducer and sessions through whole runs.

use std::sync::Arc;

use branchline_content::domain::scene::{Priority, Scene};
use branchline_content::domain::spec::GameSpec;
use branchline_core::meter::{Meter, Meters, apply_delta};
use branchline_game::application::query_handlers::view_session;
use branchline_game::application::session::{GameSession, LoadOutcome};
use branchline_game::application::telemetry::TelemetryDispatcher;
use branchline_game::domain::actions::GameAction;
use branchline_game::domain::machine::dispatch;
use branchline_game::domain::scoring::{Assignment, score_triage};
use branchline_game::domain::state::{GameState, GameStatus};
use branchline_test_support::fixtures::{triage_run_spec, two_scene_spec};
use branchline_test_support::{FixedClock, FixedSpecLoader, RecordingTelemetrySink};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn loaded(spec: GameSpec) -> GameState {
    dispatch(&GameState::new(), GameAction::LoadSuccess(Arc::new(spec))).state
}

#[test]
fn test_meter_deltas_clamp_at_both_ends() {
    let full = Meters::new(100, 100, 100);
    let empty = Meters::new(0, 0, 0);

    assert_eq!(apply_delta(&full, Meter::Growth, 50).get(Meter::Growth), 100);
    assert_eq!(apply_delta(&empty, Meter::Growth, -50).get(Meter::Growth), 0);
    for value in [0, 1, 49, 50, 99, 100] {
        for delta in [i32::MIN, -101, -1, 0, 1, 101, i32::MAX] {
            let meters = Meters::new(value, value, value);
            let result = apply_delta(&meters, Meter::Customer, delta).get(Meter::Customer);
            assert!((0..=100).contains(&result), "{value} + {delta} -> {result}");
        }
    }
}

#[test]
fn test_unknown_choice_leaves_state_deep_equal() {
    let state = loaded(two_scene_spec());

    let transition = dispatch(&state, GameAction::choose("nope"));

    assert_eq!(transition.state, state);
    assert!(transition.events.is_empty());
}

#[test]
fn test_result_scene_completes_and_accepts_nothing_further() {
    let state = dispatch(&loaded(two_scene_spec()), GameAction::choose("c1")).state;
    assert_eq!(state.status(), GameStatus::Completed);

    let again = dispatch(&state, GameAction::choose("c1"));

    assert_eq!(again.state, state);
    assert!(again.is_rejected());
}

#[test]
fn test_triage_scoring_matches_documented_example() {
    let spec = triage_run_spec();
    let Some(Scene::Minigame(minigame)) = spec.scene("triage") else {
        panic!("triage fixture lost its minigame");
    };
    let tickets = &minigame.tickets[..2];
    let assignment: Assignment = [
        ("t1".to_owned(), Priority::P1),
        ("t2".to_owned(), Priority::P1),
    ]
    .into_iter()
    .collect();

    let score = score_triage(tickets, &assignment);

    assert_eq!((score.correct, score.total), (1, 2));
    assert_eq!(score.growth_delta(), 10);
}

#[test]
fn test_restart_restores_initial_meters_exactly() {
    let mut state = loaded(triage_run_spec());
    for choice in ["continue", "push"] {
        state = dispatch(&state, GameAction::choose(choice)).state;
    }
    assert_eq!(*state.meters(), Meters::new(50, 40, 55));

    let state = dispatch(&state, GameAction::Start).state;

    assert_eq!(*state.meters(), Meters::new(50, 50, 50));
    assert_eq!(state.scene_id(), Some("welcome"));
}

#[test]
fn test_two_scene_run_end_to_end() {
    let state = loaded(two_scene_spec());

    let state = dispatch(&state, GameAction::choose("c1")).state;

    assert_eq!(state.scene_id(), Some("s2"));
    assert_eq!(state.status(), GameStatus::Completed);
    assert_eq!(state.meters().get(Meter::Customer), 60);
    assert_eq!(state.meters().get(Meter::Team), 50);
    assert_eq!(state.meters().get(Meter::Growth), 50);
}

#[tokio::test]
async fn test_session_plays_every_scene_type_with_telemetry() {
    // Arrange
    let sink = Arc::new(RecordingTelemetrySink::new());
    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()));
    let (telemetry, handle) = TelemetryDispatcher::spawn(Uuid::new_v4(), sink.clone(), clock);
    let mut session = GameSession::new(telemetry);
    let perfect: Assignment = [
        ("t1".to_owned(), Priority::P1),
        ("t2".to_owned(), Priority::P3),
        ("t3".to_owned(), Priority::P2),
        ("t4".to_owned(), Priority::P2),
    ]
    .into_iter()
    .collect();

    // Act
    let outcome = session
        .load_to_completion(&FixedSpecLoader(triage_run_spec()))
        .await;
    session.restart();
    session.choose("continue");
    session.choose("listen");
    let triage = session.submit_triage(&perfect);
    let view = view_session(&session);
    session.record_cta("result");
    drop(session);
    handle.await.unwrap();

    // Assert
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(triage.map(|t| t.growth_delta), Some(20));
    assert_eq!(view.status, GameStatus::Completed);
    assert_eq!(view.meters, Meters::new(50, 60, 70));
    assert_eq!(view.score_total, 180);
    assert_eq!(
        sink.names(),
        vec![
            "page_view",
            "game_start",
            "page_view",
            "choice_select",
            "page_view",
            "choice_select",
            "meter_update",
            "page_view",
            "minigame_start",
            "minigame_complete",
            "meter_update",
            "page_view",
            "game_complete",
            "cta_click",
        ]
    );
    let recorded = sink.recorded();
    let complete = &recorded[9];
    assert_eq!(complete.params["scene"], "triage");
    assert_eq!(complete.params["score"], 4);
    assert_eq!(complete.params["total"], 4);
    assert_eq!(recorded[12].params["score_total"], 180);
}
