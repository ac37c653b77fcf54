//! Hub Adapter
//!
//! The automation hub: owns the task scheduler pallet that dispatches XCM
//! to destinations at the scheduled times.

use super::chain_core::{
    impl_chain_adapter, ChainCore, FamilyProfile, FeeRateKey, FeeRateLookup, FeeRateSource,
};
use crate::domain::entities::{schedule_xcmp_task_args, schedule_xcmp_task_through_proxy_args};
use crate::domain::{
    AdapterError, CallIndex, DerivationScheme, DerivationVersion, EncodedCall,
    InstructionSequence, TaskId, TxReceipt, XcmpTask,
};
use crate::ports::{ChainRpc, Signer};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, AccountKind, ChainConfig};
use std::sync::Arc;
use tracing::info;

/// Pallet name reported in the hub's dispatch errors.
pub const AUTOMATION_PALLET: &str = "AutomationTime";

/// Call indices of the hub runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubCalls {
    /// `automationTime.scheduleXcmpTask`.
    pub schedule_xcmp_task: CallIndex,
    /// `automationTime.scheduleXcmpTaskThroughProxy`.
    pub schedule_xcmp_task_through_proxy: CallIndex,
    /// `automationTime.cancelTask`.
    pub cancel_task: CallIndex,
    /// `xTokens.transferMultiasset`.
    pub transfer_multiasset: CallIndex,
}

impl Default for HubCalls {
    fn default() -> Self {
        Self {
            schedule_xcmp_task: CallIndex::new(60, 1),
            schedule_xcmp_task_through_proxy: CallIndex::new(60, 2),
            cancel_task: CallIndex::new(60, 3),
            transfer_multiasset: CallIndex::new(70, 1),
        }
    }
}

/// Hub chain adapter.
pub struct HubAdapter<R: ChainRpc> {
    core: ChainCore<R>,
    calls: HubCalls,
}

impl<R: ChainRpc> HubAdapter<R> {
    /// Create an adapter with the default call indices.
    pub fn new(config: ChainConfig, rpc: Arc<R>) -> Self {
        Self::with_calls(config, HubCalls::default(), rpc)
    }

    /// Create an adapter with explicit call indices.
    pub fn with_calls(config: ChainConfig, calls: HubCalls, rpc: Arc<R>) -> Self {
        let profile = FamilyProfile {
            family: "hub",
            derivation: DerivationScheme {
                version: DerivationVersion::V3,
                output: AccountKind::AccountId32,
            },
            fee_rates: FeeRateLookup::Direct(FeeRateSource::new(
                "AssetRegistry",
                "LocationToFeePerSecond",
                FeeRateKey::VersionedLocation,
            )),
            transfer_multiasset: calls.transfer_multiasset,
        };
        Self {
            core: ChainCore::new(config, profile, rpc),
            calls,
        }
    }

    /// Call indices in use.
    pub fn calls(&self) -> &HubCalls {
        &self.calls
    }

    /// Instructions in the XCM the hub sends for `sequence`.
    ///
    /// Sovereign: `ReserveAssetDeposited, BuyExecution, DescendOrigin,
    /// Transact, RefundSurplus, DepositAsset`. Derivative: `WithdrawAsset`
    /// from the derived account in place of `ReserveAssetDeposited`.
    pub fn xcm_instruction_count(&self, sequence: InstructionSequence) -> u32 {
        match sequence {
            InstructionSequence::PayThroughSovereignAccount => 6,
            InstructionSequence::PayThroughRemoteDerivativeAccount => 6,
        }
    }

    fn validate_task(task: &XcmpTask) -> Result<(), AdapterError> {
        if task.provided_id.is_empty() {
            return Err(AdapterError::InvalidInput("empty provided id".to_string()));
        }
        task.destination.validate()?;
        task.schedule_fee.validate()?;
        task.execution_fee.asset_location.validate()?;
        Ok(())
    }

    /// Build `schedule_xcmp_task`.
    pub fn build_schedule_xcmp_task(
        &self,
        task: &XcmpTask,
        sequence: InstructionSequence,
    ) -> Result<EncodedCall, AdapterError> {
        Self::validate_task(task)?;
        Ok(EncodedCall::new(
            self.calls.schedule_xcmp_task,
            schedule_xcmp_task_args(task, sequence),
        ))
    }

    /// Build `schedule_xcmp_task_through_proxy`, executed as `schedule_as`.
    pub fn build_schedule_xcmp_task_through_proxy(
        &self,
        task: &XcmpTask,
        schedule_as: &AccountId,
    ) -> Result<EncodedCall, AdapterError> {
        Self::validate_task(task)?;
        Ok(EncodedCall::new(
            self.calls.schedule_xcmp_task_through_proxy,
            schedule_xcmp_task_through_proxy_args(task, schedule_as),
        ))
    }

    /// Submit a built scheduling call.
    pub async fn schedule_xcmp_task(
        &self,
        call: &EncodedCall,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError> {
        let receipt = self.core.submit(call, signer).await?;
        info!(chain = %self.core.config().key, "[adapter] task scheduled");
        Ok(receipt)
    }

    /// Cancel a scheduled task.
    pub async fn cancel_task(
        &self,
        task_id: &TaskId,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError> {
        let call = EncodedCall::new(self.calls.cancel_task, task_id);
        let receipt = self.core.submit(&call, signer).await?;
        info!(
            chain = %self.core.config().key,
            task_id = %task_id.to_hex(),
            "[adapter] task cancelled"
        );
        Ok(receipt)
    }
}

impl_chain_adapter!(HubAdapter);
