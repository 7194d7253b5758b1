//! Maker inventory lookup.
//!
//! The engine only consumes balances; where they come from is behind
//! [`BalanceOracle`]. A failed lookup fails the quote, it is never read
//! as a zero balance.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use parking_lot::Mutex;

use crate::error::{OracleError, OracleResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Source of on-chain token balances.
pub trait BalanceOracle: Send + Sync {
    /// Balance of `token` held by `owner`, in base units.
    fn balance_of(&self, chain_id: u64, token: Address, owner: Address)
        -> BoxFuture<'_, OracleResult<U256>>;
}

pub type DynBalanceOracle = Arc<dyn BalanceOracle>;

/// A recorded `balance_of` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceQuery {
    pub chain_id: u64,
    pub token: Address,
    pub owner: Address,
}

/// In-memory oracle for tests and local runs.
///
/// Balances are keyed by (chain, token); unset balances read as zero.
#[derive(Debug, Default)]
pub struct MockBalanceOracle {
    balances: Mutex<HashMap<(u64, Address), U256>>,
    calls: Mutex<Vec<BalanceQuery>>,
    failure: Mutex<Option<OracleError>>,
}

impl MockBalanceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, chain_id: u64, token: Address, balance: U256) {
        self.balances.lock().insert((chain_id, token), balance);
    }

    /// Make every following lookup fail with `error`.
    pub fn fail_with(&self, error: OracleError) {
        *self.failure.lock() = Some(error);
    }

    pub fn calls(&self) -> Vec<BalanceQuery> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl BalanceOracle for MockBalanceOracle {
    fn balance_of(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
    ) -> BoxFuture<'_, OracleResult<U256>> {
        Box::pin(async move {
            self.calls.lock().push(BalanceQuery {
                chain_id,
                token,
                owner,
            });
            if let Some(error) = self.failure.lock().clone() {
                return Err(error);
            }
            Ok(self
                .balances
                .lock()
                .get(&(chain_id, token))
                .copied()
                .unwrap_or(U256::ZERO))
        })
    }
}
