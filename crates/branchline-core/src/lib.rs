//! Branchline core: shared domain vocabulary.
//!
//! This crate defines the meter model and the fundamental traits that the
//! content and game crates depend on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod meter;
pub mod sink;
