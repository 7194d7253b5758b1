//! Precision-safe amount handling.
//!
//! Human-unit amounts (`"1.5"` ETH) are kept as their exact decimal digits in
//! [`HumanAmount`]; base-unit amounts (wei) are `U256`. Rates are `Decimal`
//! values applied to base units as an exact `mantissa / 10^scale` fraction.
//! Every conversion rounds toward zero so an offer never promises more than
//! was computed.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// Largest token decimals whose scaling factor `10^decimals` fits a `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// `10^exp` as a `U256`.
pub fn pow10(exp: u32) -> Result<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(exp))
        .ok_or_else(|| CoreError::AmountOverflow(format!("10^{exp}")))
}

/// `floor(value * numerator / denominator)`.
///
/// The only rounding primitive used on base-unit amounts; always truncates.
pub fn mul_div_floor(value: U256, numerator: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(CoreError::ZeroRate);
    }
    let product = value
        .checked_mul(numerator)
        .ok_or_else(|| CoreError::AmountOverflow(format!("{value} * {numerator}")))?;
    Ok(product / denominator)
}

/// Exact `(mantissa, 10^scale)` form of a non-negative `Decimal`.
fn decimal_fraction(value: Decimal) -> Result<(U256, U256)> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::NegativeAmount(value.to_string()));
    }
    Ok((
        U256::from(value.mantissa().unsigned_abs()),
        pow10(value.scale())?,
    ))
}

/// Directional exchange rate: units of the maker token per unit of the taker token.
///
/// Wraps `Decimal` so rates cannot be mixed up with amounts. Rates come from
/// configuration; request amounts never pass through `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(pub Decimal);

impl Rate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Maker-side base units for `taker_amount` taker base units:
    /// `taker_amount * rate`, rounded down to the maker token's precision.
    pub fn apply(&self, taker_amount: U256, taker_decimals: u8, maker_decimals: u8) -> Result<U256> {
        let (mantissa, scale) = decimal_fraction(self.0)?;
        let numerator = mantissa
            .checked_mul(pow10(u32::from(maker_decimals))?)
            .ok_or_else(|| CoreError::AmountOverflow(format!("rate {self}")))?;
        let denominator = scale
            .checked_mul(pow10(u32::from(taker_decimals))?)
            .ok_or_else(|| CoreError::AmountOverflow(format!("rate {self}")))?;
        mul_div_floor(taker_amount, numerator, denominator)
    }

    /// Taker-side base units for `maker_amount` maker base units:
    /// `maker_amount / rate`, rounded down to the taker token's precision.
    ///
    /// Fails with [`CoreError::ZeroRate`] when no inverse exists.
    pub fn invert(&self, maker_amount: U256, maker_decimals: u8, taker_decimals: u8) -> Result<U256> {
        if !self.is_positive() {
            return Err(CoreError::ZeroRate);
        }
        let (mantissa, scale) = decimal_fraction(self.0)?;
        let numerator = scale
            .checked_mul(pow10(u32::from(taker_decimals))?)
            .ok_or_else(|| CoreError::AmountOverflow(format!("rate {self}")))?;
        let denominator = mantissa
            .checked_mul(pow10(u32::from(maker_decimals))?)
            .ok_or_else(|| CoreError::AmountOverflow(format!("rate {self}")))?;
        mul_div_floor(maker_amount, numerator, denominator)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Exact human-unit amount as sent by the caller.
///
/// Stores the decimal digits verbatim, so any number of significant or
/// fractional digits is accepted without rounding. Normalized: no leading
/// zeros in the integer part, no trailing zeros in the fraction, and zero is
/// never negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HumanAmount {
    negative: bool,
    integer: String,
    fraction: String,
}

impl HumanAmount {
    pub fn zero() -> Self {
        Self {
            negative: false,
            integer: "0".to_string(),
            fraction: String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.integer == "0" && self.fraction.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    /// Convert to base units, truncating digits beyond `decimals`.
    ///
    /// `1.5` with 6 decimals becomes `1500000`; `0.9999999` with 6 decimals
    /// becomes `999999`.
    pub fn to_base_units(&self, decimals: u8) -> Result<U256> {
        self.check_non_negative()?;
        let decimals = usize::from(decimals);
        let kept = &self.fraction[..self.fraction.len().min(decimals)];

        let mut digits = String::with_capacity(self.integer.len() + decimals);
        digits.push_str(&self.integer);
        digits.push_str(kept);
        digits.extend(std::iter::repeat('0').take(decimals - kept.len()));

        U256::from_str_radix(&digits, 10)
            .map_err(|_| CoreError::AmountOverflow(format!("{self} with {decimals} decimals")))
    }

    /// `self * factor` in base units, rounded down once at `decimals`.
    pub fn mul_to_base_units(&self, factor: Decimal, decimals: u8) -> Result<U256> {
        if factor == Decimal::ONE {
            return self.to_base_units(decimals);
        }
        self.check_non_negative()?;
        let (mantissa, scale) = decimal_fraction(factor)?;

        // every digit of the amount takes part, so the single floor is exact
        let exact = self.scaled_digits()?;
        let numerator = mantissa
            .checked_mul(pow10(u32::from(decimals))?)
            .ok_or_else(|| CoreError::AmountOverflow(format!("{self} * {factor}")))?;
        let denominator = scale
            .checked_mul(pow10(self.fraction.len() as u32)?)
            .ok_or_else(|| CoreError::AmountOverflow(format!("{self} * {factor}")))?;
        mul_div_floor(exact, numerator, denominator)
    }

    /// All digits as one integer, i.e. `self * 10^fraction_len`.
    fn scaled_digits(&self) -> Result<U256> {
        let digits = format!("{}{}", self.integer, self.fraction);
        U256::from_str_radix(&digits, 10)
            .map_err(|_| CoreError::AmountOverflow(self.to_string()))
    }

    fn check_non_negative(&self) -> Result<()> {
        if self.negative {
            return Err(CoreError::NegativeAmount(self.to_string()));
        }
        Ok(())
    }
}

impl Default for HumanAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for HumanAmount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidAmount(s.to_string());
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (unsigned, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let integer = integer.trim_start_matches('0');
        let fraction = fraction.trim_end_matches('0');
        let mut amount = Self {
            negative,
            integer: if integer.is_empty() { "0" } else { integer }.to_string(),
            fraction: fraction.to_string(),
        };
        if amount.is_zero() {
            amount.negative = false;
        }
        Ok(amount)
    }
}

impl fmt::Display for HumanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.integer)?;
        if !self.fraction.is_empty() {
            write!(f, ".{}", self.fraction)?;
        }
        Ok(())
    }
}

impl From<u64> for HumanAmount {
    fn from(value: u64) -> Self {
        Self {
            negative: false,
            integer: value.to_string(),
            fraction: String::new(),
        }
    }
}

impl Serialize for HumanAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct HumanAmountVisitor;

impl<'de> Visitor<'de> for HumanAmountVisitor {
    type Value = HumanAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<HumanAmount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<HumanAmount, E> {
        Ok(HumanAmount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<HumanAmount, E> {
        v.to_string().parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<HumanAmount, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("non-finite amount {v}")));
        }
        v.to_string().parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for HumanAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(HumanAmountVisitor)
    }
}
