//! # Domain Errors
//!
//! Error types for task scheduling.

use thiserror::Error;
use xt_01_chain_adapters::AdapterError;

/// Task scheduling error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// A chain is missing configuration or identity the flow needs.
    /// Raised before any network call.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The request itself is unusable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A chain adapter failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl SchedulingError {
    /// True for missing configuration, whichever layer noticed it.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SchedulingError::Precondition(_)
                | SchedulingError::Adapter(AdapterError::Precondition(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_errors_are_transparent() {
        let err: SchedulingError = AdapterError::FeeOverflow.into();
        assert_eq!(err.to_string(), "Fee overflow");
    }

    #[test]
    fn test_precondition_from_either_layer() {
        assert!(SchedulingError::Precondition("hub paraId not set".into()).is_precondition());
        assert!(SchedulingError::from(AdapterError::Precondition("xcm config not set".into()))
            .is_precondition());
        assert!(!SchedulingError::InvalidRequest("empty".into()).is_precondition());
    }
}
