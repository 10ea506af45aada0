//! Branchline scene graph content.
//!
//! Typed model of the externally authored content document, its
//! referential-integrity checks and the loader seam used at session start.

pub mod application;
pub mod domain;
pub mod error;
