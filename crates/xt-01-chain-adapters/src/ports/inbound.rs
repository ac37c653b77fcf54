//! # Inbound Ports
//!
//! What every chain adapter can do, plus the optional capability of sending
//! transact-style XCM toward another chain.

use super::outbound::Signer;
use crate::domain::{
    AdapterError, AdapterState, ChainIdentity, CrossChainTransfer, EncodedCall, TxReceipt,
    XcmTransactParams,
};
use async_trait::async_trait;
use shared_types::{AccountId, ChainConfig, Location, Weight};

/// Chain adapter API - inbound port.
///
/// Data-bearing operations fail with `AdapterError::NotInitialized` unless
/// the adapter is `Connected`.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Static configuration of the chain.
    fn chain_config(&self) -> &ChainConfig;

    /// Lifecycle state.
    fn state(&self) -> AdapterState;

    /// Identity discovered at initialization.
    fn identity(&self) -> Result<ChainIdentity, AdapterError>;

    /// Connect and discover para-id and ss58 prefix.
    async fn initialize(&mut self) -> Result<(), AdapterError>;

    /// Release the connection. Terminal.
    async fn destroy(&mut self) -> Result<(), AdapterError>;

    /// Absolute location of this chain.
    fn get_location(&self) -> Result<Location, AdapterError>;

    /// Account by which `account` on parachain `para_id` is addressed here.
    fn get_derivative_account(&self, account: &[u8], para_id: u32)
        -> Result<AccountId, AdapterError>;

    /// Dry-run weight of `call` signed by `sender`.
    async fn get_extrinsic_weight(
        &self,
        call: &EncodedCall,
        sender: &AccountId,
    ) -> Result<Weight, AdapterError>;

    /// `call_weight` plus `instruction_count` XCM instructions.
    fn calculate_overall_weight(
        &self,
        call_weight: Weight,
        instruction_count: u32,
    ) -> Result<Weight, AdapterError>;

    /// Fee for `weight`, paid in the asset at `asset_location`.
    async fn weight_to_fee(&self, weight: Weight, asset_location: &Location)
        -> Result<u128, AdapterError>;

    /// Move assets to another chain.
    async fn cross_chain_transfer(
        &self,
        transfer: &CrossChainTransfer,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError>;

    /// The task scheduling capability, if this chain family has it.
    fn as_task_scheduler(&self) -> Option<&dyn TaskScheduler> {
        None
    }
}

/// Transact-through-XCM capability.
#[async_trait]
pub trait TaskScheduler: Send + Sync {
    /// Instructions in this chain's transact message.
    fn get_transact_xcm_instruction_count(&self) -> u32;

    /// Send `params.encoded_call` for execution on `params.destination`.
    async fn schedule_task_through_xcm(
        &self,
        params: &XcmTransactParams,
        signer: &dyn Signer,
    ) -> Result<TxReceipt, AdapterError>;
}
