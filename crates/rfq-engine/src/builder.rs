//! Unsigned offer assembly.
//!
//! Direct mode yields up to two offers, in this order:
//! - a direct offer to the user (flags 0, native tokens kept), only for a
//!   complete, unclamped fill;
//! - a router offer (contract sender, wrapped tokens, fee 0) when contract
//!   senders are enabled, the taker amount does not exceed the request and
//!   the maker has something to pay out.
//!
//! Intermediate mode yields one router offer, or none when the maker amount
//! is zero.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use rfq_core::{ChainRegistry, Offer, OfferFlags, QuoteRequest, TokenInfo};
use rust_decimal::Decimal;
use tracing::debug;

use crate::amounts::{AmountCalculator, AmountQuote, TokenPair};
use crate::config::{FeatureToggles, OfferConfig};
use crate::entropy::{Clock, SaltSource};
use crate::error::EngineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferKind {
    /// Taker is the requesting user.
    Direct,
    /// Taker is the router, alongside a direct-mode request.
    Router,
    /// Taker is the router, for an intermediate leg of a routed swap.
    Intermediate,
}

impl OfferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferKind::Direct => "direct",
            OfferKind::Router => "router",
            OfferKind::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unsigned offer and the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltOffer {
    pub kind: OfferKind,
    pub offer: Offer,
}

pub struct OfferBuilder {
    calculator: AmountCalculator,
    chains: Arc<ChainRegistry>,
    features: FeatureToggles,
    offer_config: OfferConfig,
    maker: Address,
    clock: Arc<dyn Clock>,
    salts: Arc<dyn SaltSource>,
}

impl OfferBuilder {
    pub fn new(
        calculator: AmountCalculator,
        chains: Arc<ChainRegistry>,
        features: FeatureToggles,
        offer_config: OfferConfig,
        maker: Address,
        clock: Arc<dyn Clock>,
        salts: Arc<dyn SaltSource>,
    ) -> Self {
        Self {
            calculator,
            chains,
            features,
            offer_config,
            maker,
            clock,
            salts,
        }
    }

    pub fn features(&self) -> FeatureToggles {
        self.features
    }

    /// Build the offers for `request` according to its swap mode.
    pub async fn build_offers(&self, request: &QuoteRequest) -> EngineResult<Vec<BuiltOffer>> {
        if request.is_intermediate_swap {
            Ok(self.build_intermediate_offer(request).await?.into_iter().collect())
        } else {
            self.build_direct_offers(request).await
        }
    }

    pub async fn build_direct_offers(
        &self,
        request: &QuoteRequest,
    ) -> EngineResult<Vec<BuiltOffer>> {
        let chain_id = request.chain_id;
        let requested = request.sell_amount_base_units()?;
        let mut offers = Vec::with_capacity(2);

        let native_pair = TokenPair::new(request.from_token, request.to_token);
        let direct = self
            .calculator
            .compute_amounts(chain_id, &request.sell_amount, &native_pair, Decimal::ONE)
            .await?;

        if !direct.clamped && direct.taker_amount == requested {
            offers.push(BuiltOffer {
                kind: OfferKind::Direct,
                offer: self.assemble(
                    request.user_address,
                    &native_pair,
                    &direct,
                    U256::from(request.fee_factor),
                    OfferFlags::NONE,
                ),
            });
        } else {
            debug!(
                chain_id,
                requested = %requested,
                taker_amount = %direct.taker_amount,
                clamped = direct.clamped,
                "Skipping direct offer, fill would be partial"
            );
        }

        if self.features.allow_contract_sender {
            let wrapped_pair = self.wrapped_pair(request)?;
            let routed = self
                .calculator
                .compute_amounts(chain_id, &request.sell_amount, &wrapped_pair, Decimal::ONE)
                .await?;

            if routed.maker_amount.is_zero() {
                debug!(
                    chain_id,
                    maker_balance = %routed.maker_balance,
                    "Skipping router offer, nothing to pay out"
                );
            } else if routed.taker_amount <= requested {
                offers.push(BuiltOffer {
                    kind: OfferKind::Router,
                    offer: self.assemble(
                        self.chains.router(chain_id)?,
                        &wrapped_pair,
                        &routed,
                        U256::ZERO,
                        self.contract_sender_flags(),
                    ),
                });
            }
        }

        Ok(offers)
    }

    /// Single router-taker offer for an intermediate swap leg, `None` when the
    /// maker has nothing to pay out.
    ///
    /// The caller is responsible for checking that contract senders are enabled.
    pub async fn build_intermediate_offer(
        &self,
        request: &QuoteRequest,
    ) -> EngineResult<Option<BuiltOffer>> {
        let chain_id = request.chain_id;
        let router = self.chains.router(chain_id)?;
        let wrapped_pair = self.wrapped_pair(request)?;
        let amounts = self
            .calculator
            .compute_amounts(chain_id, &request.sell_amount, &wrapped_pair, Decimal::ONE)
            .await?;

        if amounts.maker_amount.is_zero() {
            debug!(
                chain_id,
                maker_balance = %amounts.maker_balance,
                "Skipping intermediate offer, nothing to pay out"
            );
            return Ok(None);
        }

        Ok(Some(BuiltOffer {
            kind: OfferKind::Intermediate,
            offer: self.assemble(
                router,
                &wrapped_pair,
                &amounts,
                U256::ZERO,
                self.contract_sender_flags(),
            ),
        }))
    }

    fn contract_sender_flags(&self) -> OfferFlags {
        OfferFlags::contract_sender(self.features.allow_partial_fill)
    }

    fn wrapped_pair(&self, request: &QuoteRequest) -> EngineResult<TokenPair> {
        let chain_id = request.chain_id;
        let wrap = |token: TokenInfo| -> EngineResult<TokenInfo> {
            Ok(TokenInfo::new(
                self.chains.resolve_wrapped(chain_id, token.address)?,
                token.decimals,
            ))
        };
        Ok(TokenPair::new(wrap(request.from_token)?, wrap(request.to_token)?))
    }

    /// Fill in the fields shared by every offer: maker, expiry, salt.
    pub fn assemble(
        &self,
        taker: Address,
        pair: &TokenPair,
        amounts: &AmountQuote,
        fee_factor: U256,
        flags: OfferFlags,
    ) -> Offer {
        Offer {
            taker,
            maker: self.maker,
            taker_token: pair.taker.address,
            taker_token_amount: amounts.taker_amount,
            maker_token: pair.maker.address,
            maker_token_amount: amounts.maker_amount,
            fee_factor,
            flags,
            expiry: self
                .clock
                .now_unix()
                .saturating_add(self.offer_config.expiry_secs),
            salt: self.salts.next_salt(),
            offer_hash: None,
            maker_signature: None,
        }
    }
}
