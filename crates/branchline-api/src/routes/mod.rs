//! Route modules.

pub mod content;
pub mod health;
