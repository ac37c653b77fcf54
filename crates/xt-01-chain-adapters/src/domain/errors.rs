//! # Domain Errors
//!
//! Error taxonomy of the chain adapters. Input errors are raised before any
//! round trip; remote rejections keep the runtime's module and error names.

use shared_types::PrimitiveError;
use thiserror::Error;

/// Chain adapter error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A required configuration field is absent.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Operation requires a connected adapter.
    #[error("Adapter for {chain} is not initialized")]
    NotInitialized {
        /// Registry key of the chain.
        chain: String,
    },

    /// Location shape is not valid for the requested operation.
    #[error("Malformed location: {0}")]
    MalformedLocation(String),

    /// More junctions than an XCM interior can hold.
    #[error("Too many junctions: {0} (max 8)")]
    TooManyJunctions(usize),

    /// Address byte length is neither 20 nor 32.
    #[error("Unrecognized address format: {0} bytes")]
    UnrecognizedAddressFormat(usize),

    /// Input value rejected by a primitive encoder.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The dry-run weight estimate was rejected.
    #[error("Weight query failed: {0}")]
    WeightQuery(String),

    /// No fee rate is registered for the asset.
    #[error("No fee rate registered for asset at {location}")]
    AssetFeeRateNotFound {
        /// Display form of the asset location.
        location: String,
    },

    /// A task with this provided id already exists for the owner.
    #[error("{module}.DuplicateTask")]
    DuplicateTask {
        /// Pallet that rejected the call.
        module: String,
    },

    /// The task to cancel does not exist.
    #[error("{module}.TaskDoesNotExist")]
    TaskDoesNotExist {
        /// Pallet that rejected the call.
        module: String,
    },

    /// Any other on-chain dispatch rejection.
    #[error("Dispatch failed: {module}.{error}")]
    Dispatch {
        /// Pallet that rejected the call.
        module: String,
        /// Error name within the pallet.
        error: String,
    },

    /// Transport-level failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Checked weight arithmetic overflowed.
    #[error("Weight overflow during {operation}")]
    WeightOverflow {
        /// The arithmetic operation that overflowed.
        operation: &'static str,
    },

    /// A fee does not fit in `u128`.
    #[error("Fee overflow")]
    FeeOverflow,

    /// The pool rejected or dropped the transaction.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Storage or call bytes could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl AdapterError {
    /// Map a runtime dispatch error, keeping dedicated variants for task
    /// lifecycle rejections.
    pub fn from_dispatch(module: &str, error: &str) -> Self {
        match error {
            "DuplicateTask" => AdapterError::DuplicateTask {
                module: module.to_string(),
            },
            "TaskDoesNotExist" => AdapterError::TaskDoesNotExist {
                module: module.to_string(),
            },
            _ => AdapterError::Dispatch {
                module: module.to_string(),
                error: error.to_string(),
            },
        }
    }

    /// True for errors a caller may retry unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AdapterError::Connection(_)
                | AdapterError::WeightQuery(_)
                | AdapterError::AssetFeeRateNotFound { .. }
        )
    }
}

impl From<PrimitiveError> for AdapterError {
    fn from(err: PrimitiveError) -> Self {
        match err {
            PrimitiveError::WeightOverflow { operation } => {
                AdapterError::WeightOverflow { operation }
            }
            PrimitiveError::MalformedLocation(msg) => AdapterError::MalformedLocation(msg),
            PrimitiveError::TooManyJunctions(n) => AdapterError::TooManyJunctions(n),
            PrimitiveError::UnrecognizedAddressFormat(n) => {
                AdapterError::UnrecognizedAddressFormat(n)
            }
            PrimitiveError::MissingField(_) | PrimitiveError::InvalidConfig(_) => {
                AdapterError::Precondition(err.to_string())
            }
            PrimitiveError::GeneralKeyTooLong(_)
            | PrimitiveError::NetworkNotRepresentable(_)
            | PrimitiveError::InvalidHex(_) => AdapterError::InvalidInput(err.to_string()),
        }
    }
}
