//! # Domain Entities
//!
//! Scheduling requests and the plans computed for them. A plan holds every
//! value the executing runtimes will recompute, so it can be inspected
//! before anything is submitted.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Location, ScheduleDescriptor, Weight};
use xt_01_chain_adapters::{EncodedCall, ProvidedId, TaskId, TxReceipt, XcmTransactParams, XcmpTask};

/// A task to schedule on the hub for execution on a destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTaskRequest {
    /// Caller-chosen task id, unique per owner.
    pub provided_id: ProvidedId,
    /// When the task runs.
    pub schedule: ScheduleDescriptor,
    /// Call executed on the destination.
    pub payload: EncodedCall,
    /// Hub account owning a task scheduled through a remote derivative
    /// account. Defaults to the signer when it is a 32-byte account.
    #[serde(default)]
    pub schedule_as: Option<AccountId>,
}

impl ScheduleTaskRequest {
    /// A request with a random provided id.
    pub fn new(schedule: ScheduleDescriptor, payload: EncodedCall) -> Self {
        Self {
            provided_id: ProvidedId::random(),
            schedule,
            payload,
            schedule_as: None,
        }
    }

    /// Set the provided id.
    pub fn with_provided_id(mut self, provided_id: impl Into<ProvidedId>) -> Self {
        self.provided_id = provided_id.into();
        self
    }

    /// Set the hub account owning the task.
    pub fn with_schedule_as(mut self, account: AccountId) -> Self {
        self.schedule_as = Some(account);
        self
    }
}

/// Weight and fee of one call on the chain that executes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallBudget {
    /// Registry key of the executing chain.
    pub chain: String,
    /// Dry-run weight of the call.
    pub encoded_call_weight: Weight,
    /// XCM instructions wrapped around the call.
    pub instruction_count: u32,
    /// Call weight plus instructions.
    pub overall_weight: Weight,
    /// Fee asset, absolute.
    pub fee_location: Location,
    /// Fee for `overall_weight` in that asset.
    pub fee: u128,
}

/// Plan for a task paid through the hub's sovereign account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SovereignAccountPlan {
    /// Account the payload was dry-run for on the destination.
    pub sender: AccountId,
    /// Payload budget on the destination.
    pub payload: CallBudget,
    /// Arguments of the hub call.
    pub task: XcmpTask,
    /// `schedule_xcmp_task` for the hub.
    pub call: EncodedCall,
}

/// Plan for a task paid through the user's derived account on the
/// destination, scheduled by transacting from the destination to the hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteDerivativePlan {
    /// User's derived account on the destination; executes the payload.
    pub derived_account: AccountId,
    /// Hub account owning the task.
    pub schedule_as: AccountId,
    /// Payload budget on the destination.
    pub payload: CallBudget,
    /// Arguments of the hub call.
    pub task: XcmpTask,
    /// `schedule_xcmp_task_through_proxy` for the hub.
    pub proxy_call: EncodedCall,
    /// Origin of the proxy call on the hub.
    pub hub_origin: AccountId,
    /// Proxy call budget on the hub.
    pub outer: CallBudget,
    /// Transact sent from the destination to the hub.
    pub transact: XcmTransactParams,
}

/// A submitted plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask<P> {
    /// What was submitted.
    pub plan: P,
    /// Hub task id.
    pub task_id: TaskId,
    /// Finalized submission.
    pub receipt: TxReceipt,
}
