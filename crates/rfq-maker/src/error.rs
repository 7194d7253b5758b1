//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Key error: {0}")]
    Key(#[from] rfq_signer::KeyError),

    #[error("Core error: {0}")]
    Core(#[from] rfq_core::CoreError),

    #[error("Chain error: {0}")]
    Chain(#[from] rfq_chain::ChainError),

    #[error("Server error: {0}")]
    Server(#[from] rfq_server::ServerError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] rfq_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
