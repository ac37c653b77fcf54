//! # Weight
//!
//! Two-dimensional execution cost: computation time and proof size.
//! All arithmetic is checked; overflow is reported, never wrapped.

use parity_scale_codec::Encode;
use serde::{Deserialize, Serialize};

use crate::errors::PrimitiveError;

/// Execution weight of a call or message.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    Encode,
)]
#[serde(rename_all = "camelCase")]
pub struct Weight {
    /// Computation time, in picoseconds of reference hardware.
    #[codec(compact)]
    pub ref_time: u64,
    /// Storage proof size, in bytes.
    #[codec(compact)]
    pub proof_size: u64,
}

impl Weight {
    /// Create a weight.
    pub const fn new(ref_time: u64, proof_size: u64) -> Self {
        Self {
            ref_time,
            proof_size,
        }
    }

    /// The zero weight.
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Componentwise checked addition.
    pub fn checked_add(self, other: Weight) -> Result<Weight, PrimitiveError> {
        let overflow = PrimitiveError::WeightOverflow { operation: "add" };
        Ok(Weight {
            ref_time: self
                .ref_time
                .checked_add(other.ref_time)
                .ok_or(overflow.clone())?,
            proof_size: self
                .proof_size
                .checked_add(other.proof_size)
                .ok_or(overflow)?,
        })
    }

    /// Componentwise checked scalar multiplication.
    pub fn checked_mul(self, factor: u64) -> Result<Weight, PrimitiveError> {
        let overflow = PrimitiveError::WeightOverflow { operation: "mul" };
        Ok(Weight {
            ref_time: self.ref_time.checked_mul(factor).ok_or(overflow.clone())?,
            proof_size: self.proof_size.checked_mul(factor).ok_or(overflow)?,
        })
    }
}

/// Upper bound on the weight a message may buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode)]
pub enum WeightLimit {
    /// No limit.
    #[codec(index = 0)]
    Unlimited,
    /// At most this weight.
    #[codec(index = 1)]
    Limited(Weight),
}
