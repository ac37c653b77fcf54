//! # Domain Invariants
//!
//! Request rules checked before any chain is contacted.

use super::errors::SchedulingError;
use shared_types::ScheduleDescriptor;
use xt_01_chain_adapters::ProvidedId;

/// Default cap on execution times of a fixed schedule.
pub const DEFAULT_MAX_EXECUTION_TIMES: usize = 24;

/// Invariant: a provided id is never empty.
pub fn invariant_provided_id(provided_id: &ProvidedId) -> Result<(), SchedulingError> {
    if provided_id.is_empty() {
        return Err(SchedulingError::InvalidRequest(
            "provided id is empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariant: a schedule runs at least once.
///
/// Fixed schedules list between 1 and `max_execution_times` times;
/// recurring schedules have a non-zero frequency.
pub fn invariant_schedule(
    schedule: &ScheduleDescriptor,
    max_execution_times: usize,
) -> Result<(), SchedulingError> {
    match schedule {
        ScheduleDescriptor::Fixed { execution_times } if execution_times.is_empty() => Err(
            SchedulingError::InvalidRequest("fixed schedule has no execution times".to_string()),
        ),
        ScheduleDescriptor::Fixed { execution_times }
            if execution_times.len() > max_execution_times =>
        {
            Err(SchedulingError::InvalidRequest(format!(
                "{} execution times, at most {} allowed",
                execution_times.len(),
                max_execution_times
            )))
        }
        ScheduleDescriptor::Recurring { frequency: 0, .. } => Err(
            SchedulingError::InvalidRequest("recurring schedule has zero frequency".to_string()),
        ),
        _ => Ok(()),
    }
}
