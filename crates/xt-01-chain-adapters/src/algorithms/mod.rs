//! # Algorithms Module
//!
//! Pure computations shared by every chain family: location conversion,
//! account derivation, weight and fee arithmetic.

pub mod derivation;
pub mod location;
pub mod weight_fee;

pub use derivation::{
    blake2_256, derive_account, derive_account_v2, derive_account_v3, generate_task_id,
    keccak_256,
};
pub use location::{to_absolute, to_relative};
pub use weight_fee::{fee_from_units_per_second, overall_weight, WEIGHT_REF_TIME_PER_SECOND};
