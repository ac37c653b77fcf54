//! Mangata Adapter
//!
//! Substrate-account parachains still deriving remote accounts with the V2
//! `"multiloc"` hash. No transact capability: tasks targeting these chains
//! are paid through the hub's sovereign account.

use super::asset_registry::AssetRegistryMetadata;
use super::chain_core::{impl_chain_adapter, ChainCore, FamilyProfile, FeeRateLookup};
use crate::domain::{CallIndex, DerivationScheme, DerivationVersion};
use crate::ports::ChainRpc;
use serde::{Deserialize, Serialize};
use shared_types::{AccountKind, ChainConfig};
use std::sync::Arc;

/// Call indices of a Mangata-family runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangataCalls {
    /// `xTokens.transferMultiasset`.
    pub transfer_multiasset: CallIndex,
}

impl Default for MangataCalls {
    fn default() -> Self {
        Self {
            transfer_multiasset: CallIndex::new(12, 1),
        }
    }
}

/// Mangata-family chain adapter.
pub struct MangataAdapter<R: ChainRpc> {
    core: ChainCore<R>,
}

impl<R: ChainRpc> MangataAdapter<R> {
    /// Create an adapter with the default call indices.
    pub fn new(config: ChainConfig, rpc: Arc<R>) -> Self {
        Self::with_calls(config, MangataCalls::default(), rpc)
    }

    /// Create an adapter with explicit call indices.
    pub fn with_calls(config: ChainConfig, calls: MangataCalls, rpc: Arc<R>) -> Self {
        let profile = FamilyProfile {
            family: "mangata",
            derivation: DerivationScheme {
                version: DerivationVersion::V2,
                output: AccountKind::AccountId32,
            },
            fee_rates: FeeRateLookup::AssetRegistry(AssetRegistryMetadata::new("AssetRegistry")),
            transfer_multiasset: calls.transfer_multiasset,
        };
        Self {
            core: ChainCore::new(config, profile, rpc),
        }
    }
}

impl_chain_adapter!(MangataAdapter);
