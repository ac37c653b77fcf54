//! # XT-01 Chain Adapters
//!
//! Chain adapters for cross-chain task scheduling: compute, off-chain and
//! bit-exact, the derived accounts, XCM weights and fees that the executing
//! runtime will compute when the message arrives.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Chain Families
//!
//! | Family | Accounts | Derivation | Fee rates | Transact |
//! |--------|----------|------------|-----------|----------|
//! | Hub | AccountId32 | V3 | `AssetRegistry.LocationToFeePerSecond` | - |
//! | Moonbeam | AccountKey20 | V3 (20 bytes) | `AssetManager.AssetTypeUnitsPerSecond` | yes |
//! | Mangata | AccountId32 | V2 | `AssetRegistry.Metadata` (`additional.xcm`) | - |
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Connected --destroy--> Destroyed
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! xt-01-chain-adapters/
//! ├── domain/          # AdapterError, calls, tx statuses, value objects
//! ├── algorithms/      # Location conversion, derivation, weight/fee math
//! ├── ports/           # ChainAdapter, TaskScheduler, ChainRpc, Signer
//! ├── adapters/        # Hub, Moonbeam, Mangata, InMemoryChain
//! └── config.rs        # ChainRegistry
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    AssetRegistryMetadata, ChainCore, DevSigner, DryRun, FamilyProfile, FeeRateKey, FeeRateLookup,
    FeeRateSource, HubAdapter, HubCalls, InMemoryChain, MangataAdapter, MangataCalls,
    MoonbeamAdapter, MoonbeamCalls, Submission, AUTOMATION_PALLET, TRANSACT_INSTRUCTION_COUNT,
};
pub use algorithms::{
    derive_account, derive_account_v2, derive_account_v3, fee_from_units_per_second,
    generate_task_id, overall_weight, to_absolute, to_relative, WEIGHT_REF_TIME_PER_SECOND,
};
pub use config::{ChainRegistry, Environment};
pub use domain::{
    AdapterError, AdapterState, CallIndex, ChainEvent, ChainIdentity, CrossChainTransfer,
    DerivationScheme, DerivationVersion, EncodedCall, ExecutionFee, InstructionSequence,
    ProvidedId, StorageQuery, TaskId, TxReceipt, TxStatus, XcmTransactParams, XcmpTask,
};
pub use ports::{ChainAdapter, ChainRpc, Signer, TaskScheduler, TxStatusStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
