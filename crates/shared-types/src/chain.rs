//! # Chain Configuration
//!
//! Static description of a connected chain. Records are supplied by the
//! configuration loader; runtime-discovered identity (para-id, ss58 prefix)
//! is owned by the chain adapter, not stored here.

use serde::{Deserialize, Serialize};

use crate::asset::ChainAsset;
use crate::errors::PrimitiveError;
use crate::location::{Location, NetworkId};
use crate::weight::Weight;

/// 256-bit hash used by a chain's type registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryHasher {
    /// Blake2b with 32-byte output.
    #[default]
    Blake2_256,
    /// Keccak-256.
    Keccak256,
}

/// XCM parameters of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XcmConfig {
    /// Network used in account junctions; `None` is "any network".
    #[serde(default)]
    pub network: Option<NetworkId>,
    /// Fixed weight charged per XCM instruction.
    pub instruction_weight: Weight,
}

/// Static configuration of one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Registry key, e.g. `"turing-local"`.
    pub key: String,
    /// RPC endpoint.
    pub endpoint: String,
    /// Assets known on this chain.
    #[serde(default)]
    pub assets: Vec<ChainAsset>,
    /// Key of the default fee asset.
    #[serde(default)]
    pub default_asset: Option<String>,
    /// Relay chain key, e.g. `"rococo"`.
    pub relay_chain: String,
    /// XCM parameters; absent for chains that do not speak XCM.
    #[serde(default)]
    pub xcm: Option<XcmConfig>,
    /// Hasher used by the chain's type registry.
    #[serde(default)]
    pub registry_hasher: RegistryHasher,
}

impl ChainConfig {
    /// The default fee asset.
    pub fn default_asset(&self) -> Result<&ChainAsset, PrimitiveError> {
        let key = self
            .default_asset
            .as_deref()
            .ok_or(PrimitiveError::MissingField("defaultAsset"))?;
        self.assets
            .iter()
            .find(|a| a.key() == key)
            .ok_or(PrimitiveError::MissingField("defaultAsset"))
    }

    /// XCM parameters.
    pub fn xcm(&self) -> Result<&XcmConfig, PrimitiveError> {
        self.xcm.as_ref().ok_or(PrimitiveError::MissingField("xcm config"))
    }

    /// Network used in this chain's account junctions.
    pub fn network(&self) -> Option<NetworkId> {
        self.xcm.as_ref().and_then(|x| x.network)
    }

    /// Find a configured asset by location.
    pub fn asset_by_location(&self, location: &Location) -> Option<&ChainAsset> {
        self.assets.iter().find(|a| a.location() == location)
    }

    /// Check internal consistency.
    ///
    /// Exactly one native asset, the default asset key resolves to it, and
    /// every asset location is well formed.
    pub fn validate(&self) -> Result<(), PrimitiveError> {
        let natives: Vec<&ChainAsset> = self.assets.iter().filter(|a| a.is_native).collect();
        if natives.len() != 1 {
            return Err(PrimitiveError::InvalidConfig(format!(
                "chain {} has {} native assets, expected 1",
                self.key,
                natives.len()
            )));
        }
        if let Some(key) = &self.default_asset {
            let default = self.default_asset()?;
            if !default.is_native {
                return Err(PrimitiveError::InvalidConfig(format!(
                    "chain {}: default asset {} is not native",
                    self.key, key
                )));
            }
        }
        for asset in &self.assets {
            asset.location().validate()?;
        }
        Ok(())
    }
}
