//! Content domain model.

pub mod scene;
pub mod spec;
pub mod validation;
