//! # Outbound Ports
//!
//! What the adapters need from the outside: a chain RPC connection and a
//! transaction signer. Both are supplied by the caller.

use crate::domain::{AdapterError, EncodedCall, StorageQuery, TxStatus};
use async_trait::async_trait;
use shared_types::{AccountId, Weight};
use std::pin::Pin;
use tokio_stream::Stream;

/// Stream of status updates for one submitted extrinsic.
pub type TxStatusStream = Pin<Box<dyn Stream<Item = TxStatus> + Send>>;

/// Chain RPC connection - outbound port.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Open the connection.
    async fn connect(&self) -> Result<(), AdapterError>;

    /// Release the connection.
    async fn disconnect(&self) -> Result<(), AdapterError>;

    /// `parachainInfo.parachainId`.
    async fn para_id(&self) -> Result<u32, AdapterError>;

    /// `system.ss58Prefix`.
    async fn ss58_prefix(&self) -> Result<u16, AdapterError>;

    /// Dry-run weight estimate of `call` signed by `sender`.
    ///
    /// A rejected dry run is `AdapterError::WeightQuery`.
    async fn query_call_weight(
        &self,
        sender: &AccountId,
        call: &EncodedCall,
    ) -> Result<Weight, AdapterError>;

    /// The runtime's own weight-to-fee conversion for the native asset.
    async fn query_weight_to_fee(&self, weight: Weight) -> Result<u128, AdapterError>;

    /// Read a storage-map value.
    async fn read_storage(&self, query: &StorageQuery) -> Result<Option<Vec<u8>>, AdapterError>;

    /// Sign, submit and watch `call`.
    async fn submit_and_watch(
        &self,
        call: &EncodedCall,
        signer: &dyn Signer,
    ) -> Result<TxStatusStream, AdapterError>;
}

/// Transaction signer - outbound port.
pub trait Signer: Send + Sync {
    /// Account that signs.
    fn account_id(&self) -> AccountId;
}
