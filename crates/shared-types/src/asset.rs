//! # Assets
//!
//! Asset records from chain configuration, and the `MultiAsset` wire type
//! used by transfer calls. An asset's identity is its location.

use parity_scale_codec::Encode;
use serde::{Deserialize, Serialize};

use crate::location::Location;

/// A fungible asset known to the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Registry key, e.g. `"tur"`.
    pub key: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places.
    pub decimals: u8,
    /// Absolute location of the asset's reserve.
    pub location: Location,
}

/// An asset as configured on one particular chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAsset {
    /// The asset itself.
    #[serde(flatten)]
    pub asset: Asset,
    /// True for the chain's native (default fee) asset.
    #[serde(default)]
    pub is_native: bool,
    /// ERC-20 contract address on EVM chains.
    #[serde(default)]
    pub contract_address: Option<String>,
    /// Statically registered fee rate, per second of ref time.
    #[serde(default)]
    pub units_per_second: Option<u128>,
}

impl ChainAsset {
    /// Location of the underlying asset.
    pub fn location(&self) -> &Location {
        &self.asset.location
    }

    /// Registry key of the underlying asset.
    pub fn key(&self) -> &str {
        &self.asset.key
    }
}

/// Asset identifier in `MultiAsset`.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub enum AssetId {
    /// Identified by location.
    #[codec(index = 0)]
    Concrete(Location),
}

/// Asset quantity in `MultiAsset`.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub enum Fungibility {
    /// A fungible amount.
    #[codec(index = 0)]
    Fungible(#[codec(compact)] u128),
}

/// An amount of a concrete asset.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub struct MultiAsset {
    /// Which asset.
    pub id: AssetId,
    /// How much.
    pub fun: Fungibility,
}

impl MultiAsset {
    /// A fungible amount of the asset at `location`.
    pub fn fungible(location: Location, amount: u128) -> Self {
        Self {
            id: AssetId::Concrete(location),
            fun: Fungibility::Fungible(amount),
        }
    }
}

/// Version-tagged `MultiAsset`.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub enum VersionedMultiAsset {
    /// XCM V3 asset.
    #[codec(index = 3)]
    V3(MultiAsset),
}
