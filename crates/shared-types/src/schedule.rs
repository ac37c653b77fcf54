//! # Task Schedules
//!
//! When a remotely scheduled task runs. Owned by the caller and passed
//! through to the scheduling call unmodified.

use parity_scale_codec::Encode;
use serde::{Deserialize, Serialize};

/// Execution schedule of a task, in unix seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode)]
pub enum ScheduleDescriptor {
    /// Run once at each listed time.
    #[codec(index = 0)]
    #[serde(rename_all = "camelCase")]
    Fixed {
        /// Execution timestamps.
        execution_times: Vec<u64>,
    },
    /// Run every `frequency` seconds starting at `next_execution_time`.
    #[codec(index = 1)]
    #[serde(rename_all = "camelCase")]
    Recurring {
        /// First execution timestamp.
        next_execution_time: u64,
        /// Interval in seconds.
        frequency: u64,
    },
}

impl ScheduleDescriptor {
    /// Number of executions known up front; `None` for recurring schedules.
    pub fn execution_count(&self) -> Option<usize> {
        match self {
            ScheduleDescriptor::Fixed { execution_times } => Some(execution_times.len()),
            ScheduleDescriptor::Recurring { .. } => None,
        }
    }
}
