//! # Weight and Fee Arithmetic
//!
//! Overall XCM weight and units-per-second fee conversion. Weights use
//! checked `u64`; fees are computed in `U256` and must fit `u128`.

use crate::domain::AdapterError;
use primitive_types::U256;
use shared_types::Weight;

/// Ref time of one second of execution.
pub const WEIGHT_REF_TIME_PER_SECOND: u64 = 1_000_000_000_000;

/// `call_weight + instruction_weight * instruction_count`, checked.
pub fn overall_weight(
    call_weight: Weight,
    instruction_weight: Weight,
    instruction_count: u32,
) -> Result<Weight, AdapterError> {
    let instructions = instruction_weight.checked_mul(u64::from(instruction_count))?;
    Ok(call_weight.checked_add(instructions)?)
}

/// `ref_time * units_per_second / 10^12`, floor division.
///
/// Proof size is not charged by units-per-second fee rates.
pub fn fee_from_units_per_second(
    weight: Weight,
    units_per_second: u128,
) -> Result<u128, AdapterError> {
    let fee = U256::from(weight.ref_time) * U256::from(units_per_second)
        / U256::from(WEIGHT_REF_TIME_PER_SECOND);
    if fee > U256::from(u128::MAX) {
        return Err(AdapterError::FeeOverflow);
    }
    Ok(fee.low_u128())
}
