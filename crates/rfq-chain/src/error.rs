//! Chain access error types.

use rfq_engine::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ChainResult<T> = Result<T, ChainError>;

impl From<ChainError> for OracleError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::HttpClient(_) | ChainError::Rpc { .. } => OracleError::Rpc(e.to_string()),
            ChainError::InvalidResponse(_) | ChainError::Json(_) => {
                OracleError::Decode(e.to_string())
            }
        }
    }
}
