//! ERC20 balance oracle backed by per-chain JSON-RPC endpoints.

use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use rfq_core::ChainRegistry;
use rfq_engine::{BalanceOracle, BoxFuture, OracleError, OracleResult};
use tracing::{debug, info, warn};

use crate::error::ChainResult;
use crate::rpc::{balance_of_calldata, decode_balance, RpcClient};

/// Reads maker balances with `balanceOf` calls.
///
/// Chains without an `rpc_url` are still accepted at construction; lookups
/// on them fail with [`OracleError::Unconfigured`].
#[derive(Debug)]
pub struct RpcBalanceOracle {
    clients: HashMap<u64, RpcClient>,
}

impl RpcBalanceOracle {
    pub fn new(chains: &ChainRegistry) -> ChainResult<Self> {
        let mut clients = HashMap::new();
        for chain in chains.iter() {
            match &chain.rpc_url {
                Some(url) => {
                    clients.insert(chain.chain_id, RpcClient::new(url.clone())?);
                }
                None => {
                    warn!(chain_id = chain.chain_id, "No rpc_url configured, balances unavailable");
                }
            }
        }
        info!(chains = clients.len(), "RPC balance oracle ready");
        Ok(Self { clients })
    }

    pub fn has_endpoint(&self, chain_id: u64) -> bool {
        self.clients.contains_key(&chain_id)
    }

    async fn fetch(&self, chain_id: u64, token: Address, owner: Address) -> OracleResult<U256> {
        let client = self
            .clients
            .get(&chain_id)
            .ok_or(OracleError::Unconfigured(chain_id))?;

        let raw = client.eth_call(token, balance_of_calldata(owner)).await?;
        let balance = decode_balance(&raw)?;
        debug!(chain_id, %token, %owner, %balance, "Balance fetched");
        Ok(balance)
    }
}

impl BalanceOracle for RpcBalanceOracle {
    fn balance_of(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
    ) -> BoxFuture<'_, OracleResult<U256>> {
        Box::pin(self.fetch(chain_id, token, owner))
    }
}
