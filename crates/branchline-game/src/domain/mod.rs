//! Game domain: state, actions, telemetry payloads, reducer and scoring.

pub mod actions;
pub mod events;
pub mod machine;
pub mod scoring;
pub mod state;
