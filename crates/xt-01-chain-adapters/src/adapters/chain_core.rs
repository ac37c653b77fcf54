//! Chain Core
//!
//! State and logic shared by every chain family: the lifecycle state
//! machine, derivation, weight and fee budgeting, and extrinsic
//! submission. Family adapters wrap a `ChainCore` and add their own calls.

use super::asset_registry::AssetRegistryMetadata;
use crate::algorithms::{derive_account, fee_from_units_per_second, overall_weight, to_relative};
use crate::domain::{
    AdapterError, AdapterState, CallIndex, ChainIdentity, CrossChainTransfer, DerivationScheme,
    EncodedCall, StorageQuery, TxReceipt, TxStatus,
};
use crate::ports::{ChainRpc, Signer};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, ChainConfig, Location, MultiAsset, VersionedMultiAsset, Weight};
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// How the key of a fee-rate storage map is built from an asset location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeRateKey {
    /// `VersionedLocation::V3(location)`.
    VersionedLocation,
    /// `AssetType::Xcm(location)`, variant index 0.
    AssetTypeXcm,
    /// The bare V3 location.
    Location,
}

/// Storage map holding per-asset fee rates in units per second.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRateSource {
    /// Pallet name.
    pub pallet: String,
    /// Storage entry name.
    pub entry: String,
    /// Key layout.
    pub key: FeeRateKey,
}

impl FeeRateSource {
    /// Create a source.
    pub fn new(pallet: &str, entry: &str, key: FeeRateKey) -> Self {
        Self {
            pallet: pallet.to_string(),
            entry: entry.to_string(),
            key,
        }
    }

    /// The storage read for the asset at `location`.
    pub fn query(&self, location: &Location) -> StorageQuery {
        let key = match self.key {
            FeeRateKey::VersionedLocation => location.versioned().encode(),
            FeeRateKey::AssetTypeXcm => (0u8, location).encode(),
            FeeRateKey::Location => location.encode(),
        };
        StorageQuery {
            pallet: self.pallet.clone(),
            entry: self.entry.clone(),
            key,
        }
    }

    /// Decode a stored rate.
    pub fn decode(&self, mut value: &[u8]) -> Result<u128, AdapterError> {
        u128::decode(&mut value).map_err(|e| {
            AdapterError::Decode(format!("{}.{}: {}", self.pallet, self.entry, e))
        })
    }
}

/// Where a family keeps its non-native fee rates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeRateLookup {
    /// A map from the asset location straight to the rate.
    Direct(FeeRateSource),
    /// orml asset registry metadata.
    AssetRegistry(AssetRegistryMetadata),
}

/// What distinguishes one chain family from another inside the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FamilyProfile {
    /// Family name, for logs.
    pub family: &'static str,
    /// Remote-origin account derivation.
    pub derivation: DerivationScheme,
    /// Where non-native fee rates live.
    pub fee_rates: FeeRateLookup,
    /// `xTokens.transfer_multiasset`.
    pub transfer_multiasset: CallIndex,
}

/// Shared adapter state and behaviour.
pub struct ChainCore<R: ChainRpc> {
    config: ChainConfig,
    profile: FamilyProfile,
    rpc: Arc<R>,
    state: AdapterState,
    identity: Option<ChainIdentity>,
    instruction_weight: Option<Weight>,
}

impl<R: ChainRpc> ChainCore<R> {
    /// Create an uninitialized core.
    pub fn new(config: ChainConfig, profile: FamilyProfile, rpc: Arc<R>) -> Self {
        Self {
            config,
            profile,
            rpc,
            state: AdapterState::Uninitialized,
            identity: None,
            instruction_weight: None,
        }
    }

    /// Static configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Family profile.
    pub fn profile(&self) -> &FamilyProfile {
        &self.profile
    }

    /// Lifecycle state.
    pub fn state(&self) -> AdapterState {
        self.state
    }

    /// Discovered identity; `NotInitialized` unless connected.
    pub fn identity(&self) -> Result<ChainIdentity, AdapterError> {
        match (self.state, self.identity) {
            (AdapterState::Connected, Some(identity)) => Ok(identity),
            _ => Err(AdapterError::NotInitialized {
                chain: self.config.key.clone(),
            }),
        }
    }

    /// Connect and discover the chain's identity.
    pub async fn initialize(&mut self) -> Result<(), AdapterError> {
        match self.state {
            AdapterState::Connected => return Ok(()),
            AdapterState::Destroyed => {
                return Err(AdapterError::Precondition(format!(
                    "adapter for {} was destroyed",
                    self.config.key
                )))
            }
            AdapterState::Uninitialized => {}
        }

        self.rpc.connect().await?;
        let identity = match self.discover_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                if let Err(close) = self.rpc.disconnect().await {
                    warn!(
                        chain = %self.config.key,
                        "[adapter] disconnect after failed discovery: {}",
                        close
                    );
                }
                return Err(e);
            }
        };

        self.identity = Some(identity);
        self.instruction_weight = self.config.xcm.as_ref().map(|x| x.instruction_weight);
        self.state = AdapterState::Connected;
        info!(
            chain = %self.config.key,
            family = self.profile.family,
            para_id = identity.para_id,
            ss58_prefix = identity.ss58_prefix,
            "[adapter] connected"
        );
        Ok(())
    }

    async fn discover_identity(&self) -> Result<ChainIdentity, AdapterError> {
        let para_id = self.rpc.para_id().await?;
        let ss58_prefix = self.rpc.ss58_prefix().await?;
        Ok(ChainIdentity {
            para_id,
            ss58_prefix,
        })
    }

    /// Release the connection.
    pub async fn destroy(&mut self) -> Result<(), AdapterError> {
        if self.state.is_terminal() {
            return Ok(());
        }
        if self.state == AdapterState::Connected {
            self.rpc.disconnect().await?;
        }
        self.state = AdapterState::Destroyed;
        self.identity = None;
        info!(chain = %self.config.key, "[adapter] destroyed");
        Ok(())
    }

    /// Absolute location of this chain.
    pub fn location(&self) -> Result<Location, AdapterError> {
        Ok(Location::sibling(self.identity()?.para_id))
    }

    /// Account addressing `account` of parachain `para_id` on this chain.
    pub fn derivative_account(
        &self,
        account: &[u8],
        para_id: u32,
    ) -> Result<AccountId, AdapterError> {
        self.identity()?;
        let derived = derive_account(
            &self.profile.derivation,
            account,
            para_id,
            self.config.network(),
            self.config.registry_hasher,
        )?;
        debug!(chain = %self.config.key, para_id, derived = %derived, "[adapter] derived account");
        Ok(derived)
    }

    /// Dry-run weight of `call` signed by `sender`.
    pub async fn extrinsic_weight(
        &self,
        call: &EncodedCall,
        sender: &AccountId,
    ) -> Result<Weight, AdapterError> {
        self.identity()?;
        let weight = self.rpc.query_call_weight(sender, call).await?;
        debug!(
            chain = %self.config.key,
            ref_time = weight.ref_time,
            proof_size = weight.proof_size,
            "[adapter] extrinsic weight"
        );
        Ok(weight)
    }

    /// `call_weight` plus `instruction_count` instructions.
    pub fn overall_weight(
        &self,
        call_weight: Weight,
        instruction_count: u32,
    ) -> Result<Weight, AdapterError> {
        self.identity()?;
        let instruction_weight = self
            .instruction_weight
            .ok_or_else(|| AdapterError::Precondition("xcm config not set".to_string()))?;
        overall_weight(call_weight, instruction_weight, instruction_count)
    }

    fn is_native(&self, location: &Location) -> bool {
        self.config
            .assets
            .iter()
            .filter(|a| a.is_native)
            .any(|a| {
                a.location() == location
                    || to_relative(a.location()).ok().as_ref() == Some(location)
            })
    }

    /// Fee for `weight` in the asset at `asset_location`.
    pub async fn weight_to_fee(
        &self,
        weight: Weight,
        asset_location: &Location,
    ) -> Result<u128, AdapterError> {
        self.identity()?;
        let fee = if self.is_native(asset_location) {
            self.rpc.query_weight_to_fee(weight).await?
        } else {
            let rate = self.units_per_second(asset_location).await?;
            fee_from_units_per_second(weight, rate)?
        };
        debug!(
            chain = %self.config.key,
            asset = %asset_location,
            ref_time = weight.ref_time,
            fee,
            "[adapter] weight to fee"
        );
        Ok(fee)
    }

    async fn units_per_second(&self, asset_location: &Location) -> Result<u128, AdapterError> {
        if let Some(rate) = self
            .config
            .asset_by_location(asset_location)
            .and_then(|a| a.units_per_second)
        {
            return Ok(rate);
        }
        let not_found = || AdapterError::AssetFeeRateNotFound {
            location: asset_location.to_string(),
        };
        match &self.profile.fee_rates {
            FeeRateLookup::Direct(source) => {
                match self.rpc.read_storage(&source.query(asset_location)).await? {
                    Some(value) => source.decode(&value),
                    None => Err(not_found()),
                }
            }
            FeeRateLookup::AssetRegistry(registry) => {
                let id_query = registry.asset_id_query(asset_location);
                let asset_id = match self.rpc.read_storage(&id_query).await? {
                    Some(value) => registry.decode_asset_id(&value)?,
                    None => return Err(not_found()),
                };
                let metadata = self
                    .rpc
                    .read_storage(&registry.metadata_query(asset_id))
                    .await?
                    .ok_or_else(not_found)?;
                registry
                    .decode_fee_per_second(&metadata, asset_location)?
                    .ok_or_else(not_found)
            }
        }
    }

    /// Build `xTokens.transfer_multiasset` for `transfer`.
    pub fn build_transfer(
        &self,
        transfer: &CrossChainTransfer,
    ) -> Result<EncodedCall, AdapterError> {
        transfer.destination.validate()?;
        transfer.asset_location.validate()?;
        let beneficiary = transfer.destination.with_account(&transfer.recipient, None)?;
        Ok(EncodedCall::new(
            self.profile.transfer_multiasset,
            (
                VersionedMultiAsset::V3(MultiAsset::fungible(
                    transfer.asset_location.clone(),
                    transfer.amount,
                )),
                beneficiary.versioned(),
                transfer.weight_limit,
            ),
        ))
    }

    /// Transfer assets to another chain.
    pub async fn cross_chain_transfer(
        &self,
        transfer: &CrossChainTransfer,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError> {
        let call = self.build_transfer(transfer)?;
        info!(
            chain = %self.config.key,
            destination = %transfer.destination,
            amount = transfer.amount,
            "[adapter] cross-chain transfer"
        );
        self.submit(&call, signer).await
    }

    /// Submit `call` and wait for finalization.
    pub async fn submit(
        &self,
        call: &EncodedCall,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError> {
        self.identity()?;
        let mut statuses = self.rpc.submit_and_watch(call, signer).await?;
        while let Some(status) = statuses.next().await {
            match status {
                TxStatus::Ready => debug!(chain = %self.config.key, "[adapter] ready"),
                TxStatus::InBlock(hash) => {
                    let block = hex::encode(hash);
                    debug!(chain = %self.config.key, block = %block, "[adapter] in block")
                }
                TxStatus::Finalized { block_hash, events } => {
                    let block = hex::encode(block_hash);
                    info!(chain = %self.config.key, block = %block, "[adapter] finalized");
                    return Ok(TxReceipt { block_hash, events });
                }
                TxStatus::DispatchFailed { module, error, .. } => {
                    warn!(
                        chain = %self.config.key,
                        "[adapter] dispatch failed: {}.{}",
                        module,
                        error
                    );
                    return Err(AdapterError::from_dispatch(&module, &error));
                }
                TxStatus::Invalid(reason) => return Err(AdapterError::InvalidTransaction(reason)),
                TxStatus::Dropped => {
                    return Err(AdapterError::InvalidTransaction("dropped from pool".to_string()))
                }
            }
        }
        Err(AdapterError::Connection(
            "status stream ended before finalization".to_string(),
        ))
    }
}

/// Implement `ChainAdapter` for a family adapter by delegating to its `core`.
///
/// Pass `task_scheduler` for families that also implement `TaskScheduler`.
macro_rules! impl_chain_adapter {
    ($adapter:ident $(, $capability:ident)?) => {
        #[async_trait::async_trait]
        impl<R: $crate::ports::ChainRpc> $crate::ports::ChainAdapter for $adapter<R> {
            fn chain_config(&self) -> &shared_types::ChainConfig {
                self.core.config()
            }

            fn state(&self) -> $crate::domain::AdapterState {
                self.core.state()
            }

            fn identity(
                &self,
            ) -> Result<$crate::domain::ChainIdentity, $crate::domain::AdapterError> {
                self.core.identity()
            }

            async fn initialize(&mut self) -> Result<(), $crate::domain::AdapterError> {
                self.core.initialize().await
            }

            async fn destroy(&mut self) -> Result<(), $crate::domain::AdapterError> {
                self.core.destroy().await
            }

            fn get_location(&self) -> Result<shared_types::Location, $crate::domain::AdapterError> {
                self.core.location()
            }

            fn get_derivative_account(
                &self,
                account: &[u8],
                para_id: u32,
            ) -> Result<shared_types::AccountId, $crate::domain::AdapterError> {
                self.core.derivative_account(account, para_id)
            }

            async fn get_extrinsic_weight(
                &self,
                call: &$crate::domain::EncodedCall,
                sender: &shared_types::AccountId,
            ) -> Result<shared_types::Weight, $crate::domain::AdapterError> {
                self.core.extrinsic_weight(call, sender).await
            }

            fn calculate_overall_weight(
                &self,
                call_weight: shared_types::Weight,
                instruction_count: u32,
            ) -> Result<shared_types::Weight, $crate::domain::AdapterError> {
                self.core.overall_weight(call_weight, instruction_count)
            }

            async fn weight_to_fee(
                &self,
                weight: shared_types::Weight,
                asset_location: &shared_types::Location,
            ) -> Result<u128, $crate::domain::AdapterError> {
                self.core.weight_to_fee(weight, asset_location).await
            }

            async fn cross_chain_transfer(
                &self,
                transfer: &$crate::domain::CrossChainTransfer,
                signer: &dyn $crate::ports::Signer,
            ) -> Result<$crate::domain::TxReceipt, $crate::domain::AdapterError> {
                self.core.cross_chain_transfer(transfer, signer).await
            }

            $(impl_chain_adapter!(@$capability);)?
        }
    };
    (@task_scheduler) => {
        fn as_task_scheduler(&self) -> Option<&dyn $crate::ports::TaskScheduler> {
            Some(self)
        }
    };
}

pub(crate) use impl_chain_adapter;
