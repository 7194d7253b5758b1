//! Static directional rate table.
//!
//! Keys are normalized so the native coin and its wrapped token share one
//! entry: a rate configured for WETH -> USDT also prices ETH -> USDT.

use std::collections::HashMap;

use alloy::primitives::Address;
use rfq_core::{ChainRegistry, CoreError, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One configured rate: `rate` units of `to` per unit of `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    pub chain_id: u64,
    pub from: Address,
    pub to: Address,
    pub rate: Rate,
}

/// Wrapped-native <-> stable rates for every configured chain
/// (3100 one way, 0.0004 the other).
pub fn default_rate_entries(chains: &ChainRegistry) -> Vec<RateEntry> {
    chains
        .iter()
        .flat_map(|chain| {
            [
                RateEntry {
                    chain_id: chain.chain_id,
                    from: chain.wrapped_native,
                    to: chain.stable_asset,
                    rate: Rate::new(Decimal::new(3100, 0)),
                },
                RateEntry {
                    chain_id: chain.chain_id,
                    from: chain.stable_asset,
                    to: chain.wrapped_native,
                    rate: Rate::new(Decimal::new(4, 4)),
                },
            ]
        })
        .collect()
}

type PairKey = (u64, Address, Address);

#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<PairKey, Rate>,
    wrapped: HashMap<u64, Address>,
}

impl RateTable {
    /// Build and validate the table.
    ///
    /// Every entry must name a configured chain, carry a positive rate and
    /// appear only once after native/wrapped normalization.
    pub fn new(entries: Vec<RateEntry>, chains: &ChainRegistry) -> Result<Self, CoreError> {
        let wrapped: HashMap<u64, Address> =
            chains.iter().map(|c| (c.chain_id, c.wrapped_native)).collect();

        let mut table = Self {
            rates: HashMap::with_capacity(entries.len()),
            wrapped,
        };

        for entry in entries {
            if !chains.contains(entry.chain_id) {
                return Err(CoreError::InvalidConfig(format!(
                    "rate {} -> {} references unknown chain {}",
                    entry.from, entry.to, entry.chain_id
                )));
            }
            if !entry.rate.is_positive() {
                return Err(CoreError::InvalidConfig(format!(
                    "rate {} -> {} on chain {} must be positive, got {}",
                    entry.from, entry.to, entry.chain_id, entry.rate
                )));
            }

            let key = table.key(entry.chain_id, entry.from, entry.to);
            if key.1 == key.2 {
                return Err(CoreError::InvalidConfig(format!(
                    "rate on chain {} maps {} to itself",
                    entry.chain_id, entry.from
                )));
            }
            if table.rates.insert(key, entry.rate).is_some() {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate rate {} -> {} on chain {}",
                    entry.from, entry.to, entry.chain_id
                )));
            }
        }

        Ok(table)
    }

    fn normalize(&self, chain_id: u64, token: Address) -> Address {
        if rfq_core::is_native(&token) {
            if let Some(wrapped) = self.wrapped.get(&chain_id) {
                return *wrapped;
            }
        }
        token
    }

    fn key(&self, chain_id: u64, from: Address, to: Address) -> PairKey {
        (
            chain_id,
            self.normalize(chain_id, from),
            self.normalize(chain_id, to),
        )
    }

    /// Rate for the pair, or [`Rate::ZERO`] when the pair is not quoted.
    pub fn rate(&self, chain_id: u64, from: Address, to: Address) -> Rate {
        self.rates
            .get(&self.key(chain_id, from, to))
            .copied()
            .unwrap_or(Rate::ZERO)
    }

    pub fn supports(&self, chain_id: u64, from: Address, to: Address) -> bool {
        self.rate(chain_id, from, to).is_positive()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
