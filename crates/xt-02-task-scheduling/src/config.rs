//! # Task Scheduling Configuration

use crate::domain::DEFAULT_MAX_EXECUTION_TIMES;
use serde::{Deserialize, Serialize};

/// Task scheduling configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfig {
    /// Most execution times a fixed schedule may list; mirrors the hub's
    /// `MaxExecutionTimes`.
    pub max_execution_times: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_execution_times: DEFAULT_MAX_EXECUTION_TIMES,
        }
    }
}

impl SchedulingConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            max_execution_times: 4,
        }
    }
}
