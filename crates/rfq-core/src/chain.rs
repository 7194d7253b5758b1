//! Per-chain contract tables.

use std::collections::BTreeMap;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::token::is_native;

/// Contracts the market maker needs on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Aggregator router that takes intermediate-swap offers.
    pub router: Address,
    /// RFQ settlement contract; the EIP-712 verifying contract.
    pub rfq_contract: Address,
    pub wrapped_native: Address,
    /// Stablecoin quoted against the wrapped native coin in the default rate table.
    pub stable_asset: Address,
    /// JSON-RPC endpoint used for balance lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

/// Built-in tables for Ethereum mainnet and Sepolia.
pub fn default_chains() -> Vec<ChainConfig> {
    vec![
        ChainConfig {
            chain_id: 1,
            router: address!("5e30Ee498190C6F5D602f977ECEDad035745B796"),
            rfq_contract: address!("F45b4428B02e5EFFf08a88F4383224d6EA447935"),
            wrapped_native: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            stable_asset: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
            rpc_url: None,
        },
        ChainConfig {
            chain_id: 11155111,
            router: address!("3A9AD38c4440E90b80f89cF6D0dE25df8bDF7128"),
            rfq_contract: address!("4a91D7c1bEfd96C29306a421719c4FDAAB205d14"),
            wrapped_native: address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
            stable_asset: address!("7169D38820dfd117C3FA1f22a697dBA58d90BA06"),
            rpc_url: None,
        },
    ]
}

/// Immutable lookup of chain configs by id.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: BTreeMap<u64, ChainConfig>,
}

impl ChainRegistry {
    pub fn new(configs: Vec<ChainConfig>) -> Result<Self> {
        let mut chains = BTreeMap::new();
        for config in configs {
            let chain_id = config.chain_id;
            if chains.insert(chain_id, config).is_some() {
                return Err(CoreError::DuplicateChain(chain_id));
            }
        }
        Ok(Self { chains })
    }

    pub fn get(&self, chain_id: u64) -> Result<&ChainConfig> {
        self.chains
            .get(&chain_id)
            .ok_or(CoreError::UnknownChain(chain_id))
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.chains.contains_key(&chain_id)
    }

    pub fn router(&self, chain_id: u64) -> Result<Address> {
        Ok(self.get(chain_id)?.router)
    }

    pub fn rfq_contract(&self, chain_id: u64) -> Result<Address> {
        Ok(self.get(chain_id)?.rfq_contract)
    }

    pub fn wrapped_native(&self, chain_id: u64) -> Result<Address> {
        Ok(self.get(chain_id)?.wrapped_native)
    }

    pub fn stable_asset(&self, chain_id: u64) -> Result<Address> {
        Ok(self.get(chain_id)?.stable_asset)
    }

    /// Map the native coin to the chain's wrapped token; other addresses pass through.
    pub fn resolve_wrapped(&self, chain_id: u64, token: Address) -> Result<Address> {
        if is_native(&token) {
            self.wrapped_native(chain_id)
        } else {
            Ok(token)
        }
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainConfig> {
        self.chains.values()
    }
}
