//! Maker key loading.

use std::path::PathBuf;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use tracing::info;
use zeroize::Zeroizing;

use crate::error::KeyError;

/// Source of the maker private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Hex key in an environment variable (development).
    EnvVar { var_name: String },
    /// Hex key in a file (production, recommend 0600 permissions).
    File { path: PathBuf },
}

/// Holds the maker signer.
///
/// The key is loaded once at startup and never logged; only the derived
/// address is exposed.
pub struct KeyManager {
    signer: PrivateKeySigner,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("maker_address", &self.signer.address())
            .finish_non_exhaustive()
    }
}

fn parse_hex_key(hex_str: &str) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let trimmed = hex_str.trim().trim_start_matches("0x");
    Ok(Zeroizing::new(hex::decode(trimmed)?))
}

impl KeyManager {
    /// Load the maker key and, if `expected_address` is set, check the derived address.
    pub fn load(source: &KeySource, expected_address: Option<Address>) -> Result<Self, KeyError> {
        let secret_bytes = match source {
            KeySource::EnvVar { var_name } => {
                let hex = std::env::var(var_name)
                    .map_err(|_| KeyError::EnvVarNotFound(var_name.clone()))?;
                parse_hex_key(&hex)?
            }
            KeySource::File { path } => {
                let content = Zeroizing::new(std::fs::read_to_string(path)?);
                parse_hex_key(&content)?
            }
        };

        let manager = Self::from_secret_bytes(&secret_bytes, expected_address)?;
        info!(maker = %manager.maker_address(), "Maker key loaded");
        Ok(manager)
    }

    /// Build from raw key bytes.
    pub fn from_secret_bytes(
        secret_bytes: &[u8],
        expected_address: Option<Address>,
    ) -> Result<Self, KeyError> {
        let signer = PrivateKeySigner::from_slice(secret_bytes)
            .map_err(|e| KeyError::InvalidKey(e.to_string()))?;

        if let Some(expected) = expected_address {
            if signer.address() != expected {
                return Err(KeyError::AddressMismatch {
                    expected,
                    actual: signer.address(),
                });
            }
        }

        Ok(Self { signer })
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Address placed in the `maker` field of every offer.
    pub fn maker_address(&self) -> Address {
        self.signer.address()
    }
}
