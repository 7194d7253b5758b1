//! Offer construction engine for the RFQ market maker.
//!
//! # Key Components
//!
//! - [`RateTable`]: static directional rates per chain
//! - [`BalanceOracle`]: maker inventory lookup (RPC-backed in production)
//! - [`AmountCalculator`]: taker/maker base-unit amounts, clamped to inventory
//! - [`OfferBuilder`]: direct, router and intermediate offers
//! - [`QuoteOrchestrator`]: request classification, building and signing
//!
//! # Quote flow (in `QuoteOrchestrator::quote`)
//!
//! 1. Request validation -> `EngineError::InvalidRequest`
//! 2. Intermediate swap with contract senders disabled -> "unsupported quote request"
//! 3. Unknown chain -> `EngineError::Core(UnknownChain)`
//! 4. Pair missing from the rate table -> "unsupported token pair"
//! 5. Build offers (balance lookups happen here) and sign each one

pub mod amounts;
pub mod builder;
pub mod config;
pub mod entropy;
pub mod error;
pub mod inventory;
pub mod quoter;
pub mod rates;

pub use amounts::{AmountCalculator, AmountQuote, TokenPair};
pub use builder::{BuiltOffer, OfferBuilder, OfferKind};
pub use config::{EngineConfig, FeatureToggles, OfferConfig};
pub use entropy::{Clock, FixedClock, OsSaltSource, SaltSource, SeededSaltSource, SystemClock};
pub use error::{EngineError, EngineResult, OracleError, OracleResult};
pub use inventory::{BalanceOracle, BalanceQuery, BoxFuture, DynBalanceOracle, MockBalanceOracle};
pub use quoter::QuoteOrchestrator;
pub use rates::{default_rate_entries, RateEntry, RateTable};
