//! Token identity.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Sentinel address commonly used for the chain's native coin.
pub const NATIVE_SENTINEL: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Whether `address` denotes the native coin (zero address or the `0xEeee…` sentinel).
#[inline]
pub fn is_native(address: &Address) -> bool {
    address.is_zero() || *address == NATIVE_SENTINEL
}

/// A token as supplied by the taker.
///
/// `Address` compares raw bytes, so equality is case-insensitive with
/// respect to the hex form the caller sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        is_native(&self.address)
    }
}
