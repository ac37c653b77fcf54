//! # Inbound Ports
//!
//! API trait defining what the task scheduler can do.

use crate::domain::{
    RemoteDerivativePlan, ScheduleTaskRequest, ScheduledTask, SchedulingError,
    SovereignAccountPlan,
};
use async_trait::async_trait;
use xt_01_chain_adapters::Signer;

/// Task scheduling API - inbound port.
#[async_trait]
pub trait TaskSchedulingApi: Send + Sync {
    /// Schedule a task whose execution on the destination is paid by the
    /// hub's sovereign account there.
    ///
    /// The hub call is signed and submitted by `signer` on the hub.
    async fn schedule_xcmp_task_through_sovereign_account(
        &self,
        request: &ScheduleTaskRequest,
        signer: &dyn Signer,
    ) -> Result<ScheduledTask<SovereignAccountPlan>, SchedulingError>;

    /// Schedule a task whose execution is paid by the signer's derived
    /// account on the destination.
    ///
    /// `signer` signs on the destination, which transacts the scheduling
    /// call to the hub.
    async fn schedule_xcmp_task_through_remote_derivative_account(
        &self,
        request: &ScheduleTaskRequest,
        signer: &dyn Signer,
    ) -> Result<ScheduledTask<RemoteDerivativePlan>, SchedulingError>;
}
