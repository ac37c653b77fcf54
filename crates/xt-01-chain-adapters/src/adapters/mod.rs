//! # Adapters Layer (Hexagonal Architecture)
//!
//! One adapter per chain family, all built on `ChainCore`, plus an
//! in-memory `ChainRpc` for tests and local runs.

pub mod asset_registry;
pub mod chain_core;
pub mod hub;
pub mod in_memory_chain;
pub mod mangata;
pub mod moonbeam;

pub use asset_registry::AssetRegistryMetadata;
pub use chain_core::{ChainCore, FamilyProfile, FeeRateKey, FeeRateLookup, FeeRateSource};
pub use hub::{HubAdapter, HubCalls, AUTOMATION_PALLET};
pub use in_memory_chain::{DevSigner, DryRun, InMemoryChain, Submission};
pub use mangata::{MangataAdapter, MangataCalls};
pub use moonbeam::{MoonbeamAdapter, MoonbeamCalls, TRANSACT_INSTRUCTION_COUNT};
