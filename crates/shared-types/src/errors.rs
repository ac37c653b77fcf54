//! # Error Types
//!
//! Errors raised while building, validating or encoding XCM primitives.

use thiserror::Error;

/// Errors produced by the primitive types in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Checked weight arithmetic overflowed.
    #[error("Weight overflow during {operation}")]
    WeightOverflow {
        /// The arithmetic operation that overflowed.
        operation: &'static str,
    },

    /// Location shape is not valid for the requested operation.
    #[error("Malformed location: {0}")]
    MalformedLocation(String),

    /// More junctions than an XCM interior can hold.
    #[error("Too many junctions: {0} (max 8)")]
    TooManyJunctions(usize),

    /// `GeneralKey` data longer than 32 bytes.
    #[error("General key too long: {0} bytes (max 32)")]
    GeneralKeyTooLong(usize),

    /// Network id has no representation in the requested XCM version.
    #[error("Network {0} is not representable in XCM V2")]
    NetworkNotRepresentable(String),

    /// Address byte length is neither 20 nor 32.
    #[error("Unrecognized address format: {0} bytes")]
    UnrecognizedAddressFormat(usize),

    /// Hex input could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// A required configuration field is absent.
    #[error("{0} not set")]
    MissingField(&'static str),

    /// Configuration record is inconsistent.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
