//! HTTP transport for the RFQ market maker.
//!
//! Routes:
//! - `POST /quote`: quote request -> signed offers
//! - `POST /deal`, `POST /exception`: settlement notifications, acknowledged
//! - `GET /health`, `GET /metrics`

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{create_router, serve, AppState};
