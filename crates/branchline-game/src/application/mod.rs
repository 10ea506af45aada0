//! Session boundary: owns state, loads content, delivers telemetry.

pub mod query_handlers;
pub mod session;
pub mod telemetry;
