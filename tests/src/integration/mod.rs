//! Cross-crate integration tests.

pub mod adapters;
pub mod flows;
