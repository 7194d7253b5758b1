//! Tokenlon v6 RFQ reference market maker.
//!
//! Wires the pieces into one process:
//! - maker key loading
//! - chain registry and rate table from configuration
//! - on-chain balance lookups over JSON-RPC
//! - quote orchestration and EIP-712 signing
//! - the HTTP quote server

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, SignerConfig};
pub use error::{AppError, AppResult};
