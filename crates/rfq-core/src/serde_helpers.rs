//! Serde adapters for the offer wire format.
//!
//! The quote endpoint carries integers as decimal strings (`"3100000000"`),
//! whereas `U256` serializes as `0x`-hex by default.

/// `U256` as a base-10 string.
pub mod u256_decimal {
    use alloy::primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_str_radix(s.trim(), 10).map_err(de::Error::custom)
    }
}

/// `u64` as a base-10 string.
pub mod u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.trim().parse().map_err(de::Error::custom)
    }
}
