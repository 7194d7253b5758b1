//! Core domain types for the RFQ market maker.
//!
//! This crate provides the fundamental types shared by every other crate:
//! - `TokenInfo`: token address + decimals, with native-asset detection
//! - `QuoteRequest`, `QuoteResponse`: the quote endpoint payloads
//! - `Offer`, `OfferFlags`: the protocol offer record and its flag bits
//! - `ChainRegistry`: per-chain router / RFQ contract / wrapped-native tables
//! - `HumanAmount`, `Rate` and the human-unit <-> base-unit conversions

pub mod chain;
pub mod decimal;
pub mod error;
pub mod offer;
pub mod request;
pub mod serde_helpers;
pub mod token;

pub use chain::{default_chains, ChainConfig, ChainRegistry};
pub use decimal::{mul_div_floor, pow10, HumanAmount, Rate, MAX_DECIMALS};
pub use error::{CoreError, Result};
pub use offer::{Offer, OfferFlags, FLAG_ALLOW_CONTRACT_SENDER, FLAG_ALLOW_PARTIAL_FILL};
pub use request::{
    QuoteRequest, QuoteResponse, UNSUPPORTED_PAIR_MESSAGE, UNSUPPORTED_REQUEST_MESSAGE,
};
pub use token::{is_native, TokenInfo, NATIVE_SENTINEL};
