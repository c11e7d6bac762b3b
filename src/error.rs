//! Typed error taxonomy for the lifecycle engine.
//!
//! Business-rule failures are returned to the caller with a specific
//! reason string; storage and codec failures are collapsed into
//! [`EngineError::Storage`] because the enclosing operation has already
//! been rolled back when they surface.

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Malformed dates, missing required fields, missing rejection reason.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Cap exceeded, relation missing, one-time type already granted,
    /// insufficient balance at the approval gate.
    #[error("policy violation: {0}")]
    Policy(String),
    /// Overlapping date range, or a stale expected status on a transition.
    /// The caller may retry after refetching current state.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Actor role or ownership does not authorize the attempted operation.
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<sled::Error> for EngineError {
    fn from(e: sled::Error) -> Self {
        EngineError::Storage(e.to_string())
    }
}

impl From<minicbor::decode::Error> for EngineError {
    fn from(e: minicbor::decode::Error) -> Self {
        EngineError::Storage(format!("decode: {e}"))
    }
}

impl From<minicbor::encode::Error<core::convert::Infallible>> for EngineError {
    fn from(e: minicbor::encode::Error<core::convert::Infallible>) -> Self {
        EngineError::Storage(format!("encode: {e}"))
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(e: anyhow::Error) -> Self {
        EngineError::Storage(e.to_string())
    }
}
