//! # Application Module
//!
//! Application services orchestrating the domain and the chain adapters.

pub mod service;

pub use service::TaskSchedulingOrchestrator;
