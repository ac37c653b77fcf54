//! Moonbeam Adapter
//!
//! EVM-account parachains. Tasks are scheduled on the hub by transacting
//! through the user's derived account with `xcmTransactor`.

use super::chain_core::{
    impl_chain_adapter, ChainCore, FamilyProfile, FeeRateKey, FeeRateLookup, FeeRateSource,
};
use crate::domain::{
    AdapterError, CallIndex, DerivationScheme, DerivationVersion, EncodedCall, TxReceipt,
    XcmTransactParams,
};
use crate::ports::{ChainRpc, Signer, TaskScheduler};
use async_trait::async_trait;
use parity_scale_codec::Encode;
use serde::{Deserialize, Serialize};
use shared_types::{AccountKind, ChainConfig, VersionedLocation, Weight, WeightLimit};
use std::sync::Arc;
use tracing::info;

/// Instructions in a `transact_through_signed` message:
/// `DescendOrigin, WithdrawAsset, BuyExecution, Transact`.
pub const TRANSACT_INSTRUCTION_COUNT: u32 = 4;

/// Call indices of a Moonbeam-family runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonbeamCalls {
    /// `xcmTransactor.transactThroughSigned`.
    pub transact_through_signed: CallIndex,
    /// `xTokens.transferMultiasset`.
    pub transfer_multiasset: CallIndex,
}

impl Default for MoonbeamCalls {
    fn default() -> Self {
        Self {
            transact_through_signed: CallIndex::new(107, 4),
            transfer_multiasset: CallIndex::new(106, 1),
        }
    }
}

#[derive(Encode)]
enum Currency {
    #[codec(index = 1)]
    AsMultiLocation(VersionedLocation),
}

#[derive(Encode)]
struct CurrencyPayment {
    currency: Currency,
    fee_amount: Option<u128>,
}

#[derive(Encode)]
struct TransactWeights {
    transact_required_weight_at_most: Weight,
    overall_weight: Option<WeightLimit>,
}

/// Moonbeam-family chain adapter.
pub struct MoonbeamAdapter<R: ChainRpc> {
    core: ChainCore<R>,
    calls: MoonbeamCalls,
}

impl<R: ChainRpc> MoonbeamAdapter<R> {
    /// Create an adapter with the default call indices.
    pub fn new(config: ChainConfig, rpc: Arc<R>) -> Self {
        Self::with_calls(config, MoonbeamCalls::default(), rpc)
    }

    /// Create an adapter with explicit call indices.
    pub fn with_calls(config: ChainConfig, calls: MoonbeamCalls, rpc: Arc<R>) -> Self {
        let profile = FamilyProfile {
            family: "moonbeam",
            derivation: DerivationScheme {
                version: DerivationVersion::V3,
                output: AccountKind::AccountKey20,
            },
            fee_rates: FeeRateLookup::Direct(FeeRateSource::new(
                "AssetManager",
                "AssetTypeUnitsPerSecond",
                FeeRateKey::AssetTypeXcm,
            )),
            transfer_multiasset: calls.transfer_multiasset,
        };
        Self {
            core: ChainCore::new(config, profile, rpc),
            calls,
        }
    }

    /// Call indices in use.
    pub fn calls(&self) -> &MoonbeamCalls {
        &self.calls
    }

    /// Build `xcmTransactor.transact_through_signed` with surplus refund.
    pub fn build_transact_through_signed(
        &self,
        params: &XcmTransactParams,
    ) -> Result<EncodedCall, AdapterError> {
        params.destination.validate()?;
        params.fee_location.validate()?;
        let fee = CurrencyPayment {
            currency: Currency::AsMultiLocation(params.fee_location.versioned()),
            fee_amount: Some(params.fee_amount),
        };
        let weights = TransactWeights {
            transact_required_weight_at_most: params.encoded_call_weight,
            overall_weight: Some(WeightLimit::Limited(params.overall_weight)),
        };
        Ok(EncodedCall::new(
            self.calls.transact_through_signed,
            (
                params.destination.versioned(),
                fee,
                &params.encoded_call,
                weights,
                true,
            ),
        ))
    }
}

impl_chain_adapter!(MoonbeamAdapter, task_scheduler);

#[async_trait]
impl<R: ChainRpc> TaskScheduler for MoonbeamAdapter<R> {
    fn get_transact_xcm_instruction_count(&self) -> u32 {
        TRANSACT_INSTRUCTION_COUNT
    }

    async fn schedule_task_through_xcm(
        &self,
        params: &XcmTransactParams,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError> {
        let call = self.build_transact_through_signed(params)?;
        info!(
            chain = %self.core.config().key,
            destination = %params.destination,
            fee = params.fee_amount,
            "[adapter] transact through signed"
        );
        self.core.submit(&call, signer).await
    }
}
