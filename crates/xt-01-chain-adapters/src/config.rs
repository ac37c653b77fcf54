//! # Chain Registry Configuration
//!
//! Static chain records per environment, loaded from JSON and passed to the
//! adapters explicitly.

use crate::domain::AdapterError;
use serde::{Deserialize, Serialize};
use shared_types::{
    Asset, ChainAsset, ChainConfig, Junction, Location, RegistryHasher, Weight, XcmConfig,
};

/// Deployment environment of a registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local zombienet.
    #[default]
    Local,
    /// Public test networks.
    Staging,
    /// Production networks.
    Production,
}

/// Chain records of one environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRegistry {
    /// Environment these chains belong to.
    #[serde(default)]
    pub environment: Environment,
    chains: Vec<ChainConfig>,
}

impl ChainRegistry {
    /// An empty registry.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            chains: Vec::new(),
        }
    }

    /// Parse and validate a registry.
    pub fn from_json(json: &str) -> Result<Self, AdapterError> {
        let registry: ChainRegistry = serde_json::from_str(json)
            .map_err(|e| AdapterError::Precondition(format!("invalid chain registry: {}", e)))?;
        registry.validate()?;
        Ok(registry)
    }

    /// Add a chain record.
    pub fn insert(&mut self, config: ChainConfig) -> Result<(), AdapterError> {
        if self.chains.iter().any(|c| c.key == config.key) {
            return Err(AdapterError::Precondition(format!(
                "duplicate chain key {}",
                config.key
            )));
        }
        config.validate()?;
        self.chains.push(config);
        Ok(())
    }

    /// Chain record by key.
    pub fn get(&self, key: &str) -> Result<&ChainConfig, AdapterError> {
        self.chains
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| AdapterError::Precondition(format!("unknown chain {}", key)))
    }

    /// Keys of all chains, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chains.iter().map(|c| c.key.as_str())
    }

    /// Check every record and key uniqueness.
    pub fn validate(&self) -> Result<(), AdapterError> {
        for (i, chain) in self.chains.iter().enumerate() {
            if self.chains[..i].iter().any(|c| c.key == chain.key) {
                return Err(AdapterError::Precondition(format!(
                    "duplicate chain key {}",
                    chain.key
                )));
            }
            chain.validate()?;
        }
        Ok(())
    }

    /// Local hub (`turing-local`, 2114) with a Moonbeam-family
    /// (`moonbase-local`, 1000) and a Mangata-family (`mangata-local`, 2110)
    /// destination.
    pub fn for_testing() -> Self {
        let tur = Asset {
            key: "tur".to_string(),
            symbol: "TUR".to_string(),
            decimals: 10,
            location: Location::sibling(2114),
        };
        let foreign_tur = |units_per_second: u128| ChainAsset {
            asset: tur.clone(),
            is_native: false,
            contract_address: None,
            units_per_second: Some(units_per_second),
        };

        let turing = ChainConfig {
            key: "turing-local".to_string(),
            endpoint: "ws://127.0.0.1:9946".to_string(),
            assets: vec![native(tur.clone())],
            default_asset: Some("tur".to_string()),
            relay_chain: "local".to_string(),
            xcm: Some(XcmConfig {
                network: None,
                instruction_weight: Weight::new(1_000_000_000, 65536),
            }),
            registry_hasher: RegistryHasher::Blake2_256,
        };

        let moonbase = ChainConfig {
            key: "moonbase-local".to_string(),
            endpoint: "ws://127.0.0.1:9949".to_string(),
            assets: vec![
                native(Asset {
                    key: "dev".to_string(),
                    symbol: "DEV".to_string(),
                    decimals: 18,
                    location: Location::sibling_with(1000, Junction::PalletInstance(3)),
                }),
                foreign_tur(416_000_000_000),
            ],
            default_asset: Some("dev".to_string()),
            relay_chain: "local".to_string(),
            xcm: Some(XcmConfig {
                network: None,
                instruction_weight: Weight::new(250_000_000, 10_000),
            }),
            registry_hasher: RegistryHasher::Keccak256,
        };

        let mangata = ChainConfig {
            key: "mangata-local".to_string(),
            endpoint: "ws://127.0.0.1:9947".to_string(),
            assets: vec![
                native(Asset {
                    key: "mgx".to_string(),
                    symbol: "MGX".to_string(),
                    decimals: 18,
                    location: Location::sibling_with(2110, Junction::GeneralIndex(0)),
                }),
                foreign_tur(10_000_000_000_000),
            ],
            default_asset: Some("mgx".to_string()),
            relay_chain: "local".to_string(),
            xcm: Some(XcmConfig {
                network: None,
                instruction_weight: Weight::new(150_000_000, 0),
            }),
            registry_hasher: RegistryHasher::Blake2_256,
        };

        Self {
            environment: Environment::Local,
            chains: vec![turing, moonbase, mangata],
        }
    }
}

fn native(asset: Asset) -> ChainAsset {
    ChainAsset {
        asset,
        is_native: true,
        contract_address: None,
        units_per_second: None,
    }
}
