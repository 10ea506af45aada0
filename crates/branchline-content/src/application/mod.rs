//! Content loading.

pub mod loader;
