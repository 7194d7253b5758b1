//! Taker/maker amount derivation with inventory clamping.
//!
//! The sell amount is converted to taker base units from its exact digits,
//! then the rate is applied in `U256` and truncated toward zero. When the
//! maker side exceeds the maker's balance, the maker amount becomes the
//! balance and the taker amount is recomputed through the inverse rate.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use rfq_core::{ChainRegistry, HumanAmount, TokenInfo};
use rfq_telemetry::Metrics;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::inventory::DynBalanceOracle;
use crate::rates::RateTable;

/// Token the maker receives (`taker`) and token the maker pays out (`maker`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPair {
    pub taker: TokenInfo,
    pub maker: TokenInfo,
}

impl TokenPair {
    pub fn new(taker: TokenInfo, maker: TokenInfo) -> Self {
        Self { taker, maker }
    }
}

/// Result of one amount computation, all in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountQuote {
    pub taker_amount: U256,
    pub maker_amount: U256,
    /// Raw maker balance of the (wrapped) maker token at lookup time.
    pub maker_balance: U256,
    /// True when the maker amount was reduced to the balance.
    pub clamped: bool,
}

pub struct AmountCalculator {
    rates: Arc<RateTable>,
    chains: Arc<ChainRegistry>,
    oracle: DynBalanceOracle,
    maker: Address,
}

impl AmountCalculator {
    pub fn new(
        rates: Arc<RateTable>,
        chains: Arc<ChainRegistry>,
        oracle: DynBalanceOracle,
        maker: Address,
    ) -> Self {
        Self {
            rates,
            chains,
            oracle,
            maker,
        }
    }

    /// Compute amounts for `sell_amount * fill_percentage` of `pair.taker`.
    ///
    /// Issues exactly one balance lookup. Fails with `UnquotablePair` before
    /// the lookup when the rate table has no entry for the pair.
    pub async fn compute_amounts(
        &self,
        chain_id: u64,
        sell_amount: &HumanAmount,
        pair: &TokenPair,
        fill_percentage: Decimal,
    ) -> EngineResult<AmountQuote> {
        let rate = self
            .rates
            .rate(chain_id, pair.taker.address, pair.maker.address);
        if !rate.is_positive() {
            return Err(EngineError::UnquotablePair {
                chain_id,
                from: pair.taker.address,
                to: pair.maker.address,
            });
        }

        let mut taker_amount =
            sell_amount.mul_to_base_units(fill_percentage, pair.taker.decimals)?;
        let mut maker_amount =
            rate.apply(taker_amount, pair.taker.decimals, pair.maker.decimals)?;

        let balance_token = self.chains.resolve_wrapped(chain_id, pair.maker.address)?;
        let maker_balance = match self
            .oracle
            .balance_of(chain_id, balance_token, self.maker)
            .await
        {
            Ok(balance) => balance,
            Err(e) => {
                warn!(chain_id, token = %balance_token, error = %e, "Balance lookup failed");
                Metrics::oracle_failure(chain_id);
                return Err(e.into());
            }
        };

        let clamped = maker_amount > maker_balance;
        if clamped {
            let clamped_taker =
                rate.invert(maker_balance, pair.maker.decimals, pair.taker.decimals)?;

            info!(
                chain_id,
                desired_maker = %maker_amount,
                balance = %maker_balance,
                taker_amount = %clamped_taker,
                "Quoting for available balance"
            );
            Metrics::balance_clamped();

            taker_amount = clamped_taker.min(taker_amount);
            maker_amount = maker_balance;
        }

        debug!(
            chain_id,
            taker_amount = %taker_amount,
            maker_amount = %maker_amount,
            maker_balance = %maker_balance,
            "Amounts computed"
        );

        Ok(AmountQuote {
            taker_amount,
            maker_amount,
            maker_balance,
            clamped,
        })
    }
}
