//! Branchline scene state machine.
//!
//! Owns session progression: the pure `dispatch` reducer over game state,
//! the triage minigame scoring engine, and the session adapter that loads
//! content and delivers telemetry without ever blocking a transition.

pub mod application;
pub mod domain;
