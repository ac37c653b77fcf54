//! # Task Scheduling Orchestrator
//!
//! Application service composing the hub and a destination adapter into
//! the two scheduling flows.
//!
//! Every flow runs in two phases: configuration and identity checks that
//! touch no network, then a sequential pipeline of weight, overall weight,
//! fee, call and submission. Each weight/fee pair is computed by the
//! adapter of the chain that executes the call.

use async_trait::async_trait;
use shared_types::{AccountId, AccountKind, Location};
use tracing::{debug, info, warn};
use xt_01_chain_adapters::{
    generate_task_id, to_relative, AdapterError, ChainAdapter, ChainRpc, EncodedCall, ExecutionFee,
    HubAdapter, InstructionSequence, Signer, TaskScheduler, XcmTransactParams, XcmpTask,
};

use crate::config::SchedulingConfig;
use crate::domain::{
    invariant_provided_id, invariant_schedule, CallBudget, RemoteDerivativePlan,
    ScheduleTaskRequest, ScheduledTask, SchedulingError, SovereignAccountPlan,
};
use crate::ports::TaskSchedulingApi;

/// Connected identity and fee asset of one chain, gathered offline.
struct ChainFacts {
    key: String,
    para_id: u32,
    default_asset: Location,
}

fn chain_facts(chain: &dyn ChainAdapter) -> Result<ChainFacts, SchedulingError> {
    let config = chain.chain_config();
    let key = config.key.clone();
    let para_id = chain
        .identity()
        .map_err(|_| SchedulingError::Precondition(format!("{} paraId not set", key)))?
        .para_id;
    let default_asset = config
        .default_asset()
        .map_err(|_| SchedulingError::Precondition(format!("{} defaultAsset not set", key)))?
        .location()
        .clone();
    default_asset.validate().map_err(AdapterError::from)?;
    config
        .xcm()
        .map_err(|_| SchedulingError::Precondition(format!("{} xcm config not set", key)))?;
    Ok(ChainFacts {
        key,
        para_id,
        default_asset,
    })
}

/// Weight and fee of `call` on `chain`.
async fn budget(
    chain: &dyn ChainAdapter,
    call: &EncodedCall,
    sender: &AccountId,
    instruction_count: u32,
    fee_location: &Location,
) -> Result<CallBudget, SchedulingError> {
    let encoded_call_weight = chain.get_extrinsic_weight(call, sender).await?;
    let overall_weight = chain.calculate_overall_weight(encoded_call_weight, instruction_count)?;
    let fee = chain.weight_to_fee(overall_weight, fee_location).await?;
    let budget = CallBudget {
        chain: chain.chain_config().key.clone(),
        encoded_call_weight,
        instruction_count,
        overall_weight,
        fee_location: fee_location.clone(),
        fee,
    };
    debug!(
        chain = %budget.chain,
        ref_time = overall_weight.ref_time,
        proof_size = overall_weight.proof_size,
        fee,
        "[scheduler] call budget"
    );
    Ok(budget)
}

/// Task Scheduling Orchestrator - schedules tasks on the hub for execution
/// on a destination.
///
/// Borrows connected adapters; it never initializes or destroys them.
pub struct TaskSchedulingOrchestrator<'a, R: ChainRpc> {
    /// Configuration.
    config: SchedulingConfig,
    /// Automation hub.
    hub: &'a HubAdapter<R>,
    /// Chain the task executes on.
    destination: &'a dyn ChainAdapter,
}

impl<'a, R: ChainRpc> TaskSchedulingOrchestrator<'a, R> {
    /// Create a new orchestrator.
    pub fn new(
        config: SchedulingConfig,
        hub: &'a HubAdapter<R>,
        destination: &'a dyn ChainAdapter,
    ) -> Self {
        Self {
            config,
            hub,
            destination,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    fn check_request(&self, request: &ScheduleTaskRequest) -> Result<(), SchedulingError> {
        invariant_provided_id(&request.provided_id)?;
        invariant_schedule(&request.schedule, self.config.max_execution_times)
    }

    fn transact_capability(&self) -> Result<&'a dyn TaskScheduler, SchedulingError> {
        self.destination.as_task_scheduler().ok_or_else(|| {
            SchedulingError::Precondition(format!(
                "destination {} cannot schedule tasks through XCM",
                self.destination.chain_config().key
            ))
        })
    }

    /// Compute everything needed to schedule `request` paid by the hub's
    /// sovereign account on the destination.
    ///
    /// The payload is dry-run on the destination for the signer's derived
    /// account there; its fee is charged in the hub's default asset at the
    /// destination's rate.
    pub async fn plan_pay_through_sovereign_account(
        &self,
        request: &ScheduleTaskRequest,
        signer: &dyn Signer,
    ) -> Result<SovereignAccountPlan, SchedulingError> {
        self.check_request(request)?;
        let hub = chain_facts(self.hub)?;
        let destination = chain_facts(self.destination)?;
        let schedule_fee = to_relative(&hub.default_asset)?;
        let destination_location = self.destination.get_location()?;

        let sender = self
            .destination
            .get_derivative_account(signer.account_id().as_bytes(), hub.para_id)?;
        let sequence = InstructionSequence::PayThroughSovereignAccount;
        let payload = budget(
            self.destination,
            &request.payload,
            &sender,
            self.hub.xcm_instruction_count(sequence),
            &hub.default_asset,
        )
        .await?;

        let task = XcmpTask {
            provided_id: request.provided_id.clone(),
            destination: destination_location,
            schedule: request.schedule.clone(),
            schedule_fee,
            execution_fee: ExecutionFee {
                asset_location: hub.default_asset,
                amount: payload.fee,
            },
            encoded_call: request.payload.clone(),
            encoded_call_weight: payload.encoded_call_weight,
            overall_weight: payload.overall_weight,
        };
        let call = self.hub.build_schedule_xcmp_task(&task, sequence)?;
        debug!(
            hub = %hub.key,
            destination = %destination.key,
            provided_id = %request.provided_id,
            "[scheduler] sovereign account plan ready"
        );

        Ok(SovereignAccountPlan {
            sender,
            payload,
            task,
            call,
        })
    }

    /// Compute everything needed to schedule `request` paid by the task
    /// owner's derived account on the destination.
    ///
    /// Two calls are budgeted. The payload runs on the destination as the
    /// owner's derived account and is paid in the destination's default
    /// asset. The proxy scheduling call runs on the hub as the signer's
    /// derived account there and is paid in the hub's default asset.
    pub async fn plan_pay_through_remote_derivative_account(
        &self,
        request: &ScheduleTaskRequest,
        signer: &dyn Signer,
    ) -> Result<RemoteDerivativePlan, SchedulingError> {
        self.check_request(request)?;
        let scheduler = self.transact_capability()?;
        let hub = chain_facts(self.hub)?;
        let destination = chain_facts(self.destination)?;
        let signer_account = signer.account_id();
        let schedule_as = match request.schedule_as {
            Some(account) => account,
            None if signer_account.kind() == AccountKind::AccountId32 => signer_account,
            None => {
                return Err(SchedulingError::Precondition(format!(
                    "scheduleAs not set and signer {} has no account on {}",
                    signer_account, hub.key
                )))
            }
        };
        if schedule_as.kind() != AccountKind::AccountId32 {
            return Err(SchedulingError::InvalidRequest(format!(
                "scheduleAs {} is not an account of {}",
                schedule_as, hub.key
            )));
        }
        let schedule_fee = to_relative(&hub.default_asset)?;
        let hub_location = self.hub.get_location()?;
        let destination_location = self.destination.get_location()?;

        let derived_account = self
            .destination
            .get_derivative_account(schedule_as.as_bytes(), hub.para_id)?;
        let payload = budget(
            self.destination,
            &request.payload,
            &derived_account,
            self.hub
                .xcm_instruction_count(InstructionSequence::PayThroughRemoteDerivativeAccount),
            &destination.default_asset,
        )
        .await?;

        let task = XcmpTask {
            provided_id: request.provided_id.clone(),
            destination: destination_location,
            schedule: request.schedule.clone(),
            schedule_fee,
            execution_fee: ExecutionFee {
                asset_location: destination.default_asset,
                amount: payload.fee,
            },
            encoded_call: request.payload.clone(),
            encoded_call_weight: payload.encoded_call_weight,
            overall_weight: payload.overall_weight,
        };
        let proxy_call = self
            .hub
            .build_schedule_xcmp_task_through_proxy(&task, &schedule_as)?;

        let hub_origin = self
            .hub
            .get_derivative_account(signer_account.as_bytes(), destination.para_id)?;
        let outer = budget(
            self.hub,
            &proxy_call,
            &hub_origin,
            scheduler.get_transact_xcm_instruction_count(),
            &hub.default_asset,
        )
        .await?;

        let transact = XcmTransactParams {
            destination: hub_location,
            encoded_call: proxy_call.clone(),
            fee_location: hub.default_asset,
            fee_amount: outer.fee,
            encoded_call_weight: outer.encoded_call_weight,
            overall_weight: outer.overall_weight,
        };
        debug!(
            hub = %hub.key,
            destination = %destination.key,
            provided_id = %request.provided_id,
            derived = %derived_account,
            hub_origin = %hub_origin,
            "[scheduler] remote derivative plan ready"
        );

        Ok(RemoteDerivativePlan {
            derived_account,
            schedule_as,
            payload,
            task,
            proxy_call,
            hub_origin,
            outer,
            transact,
        })
    }
}

#[async_trait]
impl<'a, R: ChainRpc> TaskSchedulingApi for TaskSchedulingOrchestrator<'a, R> {
    async fn schedule_xcmp_task_through_sovereign_account(
        &self,
        request: &ScheduleTaskRequest,
        signer: &dyn Signer,
    ) -> Result<ScheduledTask<SovereignAccountPlan>, SchedulingError> {
        let plan = self
            .plan_pay_through_sovereign_account(request, signer)
            .await?;
        let receipt = match self.hub.schedule_xcmp_task(&plan.call, signer).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(provided_id = %request.provided_id, "[scheduler] hub rejected task: {}", e);
                return Err(e.into());
            }
        };
        let task_id = generate_task_id(&signer.account_id(), &request.provided_id);
        info!(
            provided_id = %request.provided_id,
            task_id = %task_id.to_hex(),
            fee = plan.payload.fee,
            "[scheduler] scheduled through sovereign account"
        );
        Ok(ScheduledTask {
            plan,
            task_id,
            receipt,
        })
    }

    async fn schedule_xcmp_task_through_remote_derivative_account(
        &self,
        request: &ScheduleTaskRequest,
        signer: &dyn Signer,
    ) -> Result<ScheduledTask<RemoteDerivativePlan>, SchedulingError> {
        let plan = self
            .plan_pay_through_remote_derivative_account(request, signer)
            .await?;
        let scheduler = self.transact_capability()?;
        let receipt = match scheduler
            .schedule_task_through_xcm(&plan.transact, signer)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(provided_id = %request.provided_id, "[scheduler] transact rejected: {}", e);
                return Err(e.into());
            }
        };
        let task_id = generate_task_id(&plan.schedule_as, &request.provided_id);
        info!(
            provided_id = %request.provided_id,
            task_id = %task_id.to_hex(),
            fee = plan.payload.fee,
            outer_fee = plan.outer.fee,
            "[scheduler] scheduled through remote derivative account"
        );
        Ok(ScheduledTask {
            plan,
            task_id,
            receipt,
        })
    }
}
