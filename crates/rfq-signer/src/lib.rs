//! Maker key management and EIP-712 offer signing.
//!
//! # Key Components
//!
//! - [`KeyManager`]: loads the maker's private key once at startup
//! - [`OfferSigner`]: hashes and signs offers against the per-chain RFQ domain
//! - [`hash_offer`]: the EIP-712 struct hash used as `offerHash`

pub mod error;
pub mod key;
pub mod signer;

pub use error::{KeyError, SignerError, SignerResult};
pub use key::{KeyManager, KeySource};
pub use signer::{hash_offer, OfferSignature, OfferSigner, RFQOffer, DOMAIN_NAME, DOMAIN_VERSION};
