//! Error types for rfq-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid quote request: {0}")]
    InvalidRequest(String),

    #[error("Chain {0} is not configured")]
    UnknownChain(u64),

    #[error("Chain {0} is configured more than once")]
    DuplicateChain(u64),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),

    #[error("Negative amount: {0}")]
    NegativeAmount(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Rate has no inverse")]
    ZeroRate,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
