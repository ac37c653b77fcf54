//! # Shared Types Crate
//!
//! XCM primitives shared by the chain-adapter and task-scheduling
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Version-independent identity**: a `Location` is a parent count plus a
//!   junction sequence. XCM V2 and V3 are encodings of it, not variants.
//! - **Checked arithmetic**: `Weight` never wraps; overflow is an error.
//! - **Bit-exact wire formats**: every type that appears in a call argument
//!   implements `parity_scale_codec::Encode` with the runtime's variant
//!   indices.

pub mod account;
pub mod asset;
pub mod chain;
pub mod errors;
pub mod location;
pub mod schedule;
pub mod serde_hex;
pub mod weight;

pub use account::{AccountId, AccountKind};
pub use asset::{Asset, AssetId, ChainAsset, Fungibility, MultiAsset, VersionedMultiAsset};
pub use chain::{ChainConfig, RegistryHasher, XcmConfig};
pub use errors::PrimitiveError;
pub use location::{Junction, Junctions, Location, NetworkId, VersionedLocation, MAX_JUNCTIONS};
pub use schedule::ScheduleDescriptor;
pub use weight::{Weight, WeightLimit};
