//! # XT-02 Task Scheduling
//!
//! Schedules tasks on the automation hub for execution on a destination
//! parachain, composing the chain adapters of `xt-01-chain-adapters`.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Flows
//!
//! | Flow | Who pays on the destination | Submitted on |
//! |------|-----------------------------|--------------|
//! | Pay through sovereign account | Hub's sovereign account | Hub |
//! | Pay through remote derivative account | Owner's derived account | Destination, transacted to the hub |
//!
//! The remote flow nests two budgets: the payload is weighed and priced on
//! the destination, the proxy scheduling call on the hub. Every flow checks
//! configuration and identity before its first network call.
//!
//! ## Module Structure
//!
//! ```text
//! xt-02-task-scheduling/
//! ├── domain/          # Requests, plans, errors, request invariants
//! ├── ports/           # TaskSchedulingApi (inbound)
//! ├── application/     # TaskSchedulingOrchestrator
//! └── config.rs        # SchedulingConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::TaskSchedulingOrchestrator;
pub use config::SchedulingConfig;
pub use domain::{
    invariant_provided_id, invariant_schedule, CallBudget, RemoteDerivativePlan,
    ScheduleTaskRequest, ScheduledTask, SchedulingError, SovereignAccountPlan,
    DEFAULT_MAX_EXECUTION_TIMES,
};
pub use ports::TaskSchedulingApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
