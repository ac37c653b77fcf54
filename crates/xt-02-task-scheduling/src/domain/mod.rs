//! # Domain Module
//!
//! Core domain types for task scheduling.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
