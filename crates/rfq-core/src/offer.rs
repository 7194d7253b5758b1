//! RFQ offer record and flag bits.

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::serde_helpers::{u256_decimal, u64_string};

/// Bit index allowing a contract (not only an EOA) to act as taker.
pub const FLAG_ALLOW_CONTRACT_SENDER: usize = 255;
/// Bit index allowing the taker to fill less than the full amount.
pub const FLAG_ALLOW_PARTIAL_FILL: usize = 254;

/// Offer capabilities, encoded into the high bits of a `uint256`.
///
/// No bits set means direct fill only, EOA sender only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OfferFlags {
    pub allow_contract_sender: bool,
    pub allow_partial_fill: bool,
}

impl OfferFlags {
    pub const NONE: Self = Self {
        allow_contract_sender: false,
        allow_partial_fill: false,
    };

    /// Flags for an offer whose taker is the router contract.
    pub fn contract_sender(allow_partial_fill: bool) -> Self {
        Self {
            allow_contract_sender: true,
            allow_partial_fill,
        }
    }

    /// Encode as the on-chain `uint256` bitmask.
    pub fn encode(&self) -> U256 {
        let mut bits = U256::ZERO;
        if self.allow_contract_sender {
            bits |= U256::from(1u8) << FLAG_ALLOW_CONTRACT_SENDER;
        }
        if self.allow_partial_fill {
            bits |= U256::from(1u8) << FLAG_ALLOW_PARTIAL_FILL;
        }
        bits
    }

    /// Decode from a bitmask. Bits other than the two named ones are ignored.
    pub fn decode(bits: U256) -> Self {
        Self {
            allow_contract_sender: bits.bit(FLAG_ALLOW_CONTRACT_SENDER),
            allow_partial_fill: bits.bit(FLAG_ALLOW_PARTIAL_FILL),
        }
    }
}

impl Serialize for OfferFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for OfferFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bits = U256::from_str_radix(s.trim(), 10).map_err(de::Error::custom)?;
        Ok(Self::decode(bits))
    }
}

/// A protocol offer.
///
/// `offer_hash` and `maker_signature` stay `None` until the offer has been
/// signed; afterwards `offer_hash` is the EIP-712 struct hash of the ten
/// preceding fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub taker: Address,
    pub maker: Address,
    pub taker_token: Address,
    #[serde(with = "u256_decimal")]
    pub taker_token_amount: U256,
    pub maker_token: Address,
    #[serde(with = "u256_decimal")]
    pub maker_token_amount: U256,
    #[serde(with = "u256_decimal")]
    pub fee_factor: U256,
    pub flags: OfferFlags,
    /// Unix seconds.
    #[serde(with = "u64_string")]
    pub expiry: u64,
    pub salt: B256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maker_signature: Option<Bytes>,
}

impl Offer {
    /// Salt as the `uint256` the contract sees.
    #[inline]
    pub fn salt_value(&self) -> U256 {
        U256::from_be_bytes(self.salt.0)
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.offer_hash.is_some() && self.maker_signature.is_some()
    }

    /// Attach the signing result.
    pub fn attach_signature(&mut self, offer_hash: B256, signature: Bytes) {
        self.offer_hash = Some(offer_hash);
        self.maker_signature = Some(signature);
    }
}
