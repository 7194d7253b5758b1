//! Error types for rfq-engine.

use alloy::primitives::Address;
use rfq_core::CoreError;
use rfq_signer::SignerError;
use thiserror::Error;

/// Balance lookup errors.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Malformed balance response: {0}")]
    Decode(String),

    #[error("No balance source configured for chain {0}")]
    Unconfigured(u64),
}

pub type OracleResult<T> = Result<T, OracleError>;

/// Quote engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid quote request: {0}")]
    InvalidRequest(String),

    #[error("No rate for {from} -> {to} on chain {chain_id}")]
    UnquotablePair {
        chain_id: u64,
        from: Address,
        to: Address,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Balance lookup failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("Signing failed: {0}")]
    Signer(#[from] SignerError),
}

impl EngineError {
    /// Whether the failure was caused by the request contents rather than
    /// by configuration or an upstream dependency.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidRequest(_)
                | EngineError::Core(
                    CoreError::AmountOverflow(_)
                        | CoreError::NegativeAmount(_)
                        | CoreError::InvalidAmount(_)
                )
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
