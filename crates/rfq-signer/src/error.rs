//! Error types for rfq-signer.

use alloy::primitives::Address;
use rfq_core::CoreError;
use thiserror::Error;

/// Key management errors.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Failed to decode hex: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Address mismatch: expected {expected}, got {actual}")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Offer signing errors.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Signing failed: {0}")]
    SigningFailed(#[from] alloy::signers::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Offer carries no signature")]
    MissingSignature,

    #[error("Malformed signature: {0}")]
    InvalidSignature(String),
}

pub type SignerResult<T> = Result<T, SignerError>;
