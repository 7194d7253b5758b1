//! Quote orchestration.

use std::sync::Arc;
use std::time::Instant;

use rfq_core::{
    ChainRegistry, CoreError, QuoteRequest, QuoteResponse, UNSUPPORTED_PAIR_MESSAGE,
    UNSUPPORTED_REQUEST_MESSAGE,
};
use rfq_signer::OfferSigner;
use rfq_telemetry::Metrics;
use tracing::{debug, info, warn};

use crate::amounts::AmountCalculator;
use crate::builder::{BuiltOffer, OfferBuilder};
use crate::config::{EngineConfig, FeatureToggles};
use crate::entropy::{Clock, SaltSource};
use crate::error::{EngineError, EngineResult};
use crate::inventory::DynBalanceOracle;
use crate::rates::RateTable;

/// Turns quote requests into signed offer sets.
///
/// Holds only immutable configuration and shared handles, so one instance
/// serves concurrent requests without locking.
pub struct QuoteOrchestrator {
    builder: OfferBuilder,
    signer: Arc<OfferSigner>,
    rates: Arc<RateTable>,
    chains: Arc<ChainRegistry>,
    features: FeatureToggles,
}

impl QuoteOrchestrator {
    /// Wire the engine. The signer's address becomes the `maker` of every
    /// offer and the owner for balance lookups.
    pub fn new(
        config: &EngineConfig,
        chains: Arc<ChainRegistry>,
        rates: Arc<RateTable>,
        oracle: DynBalanceOracle,
        signer: Arc<OfferSigner>,
        clock: Arc<dyn Clock>,
        salts: Arc<dyn SaltSource>,
    ) -> Self {
        let maker = signer.maker_address();
        let calculator = AmountCalculator::new(rates.clone(), chains.clone(), oracle, maker);
        let builder = OfferBuilder::new(
            calculator,
            chains.clone(),
            config.features,
            config.offer.clone(),
            maker,
            clock,
            salts,
        );
        Self {
            builder,
            signer,
            rates,
            chains,
            features: config.features,
        }
    }

    pub fn features(&self) -> FeatureToggles {
        self.features
    }

    /// Answer one quote request.
    ///
    /// Intermediate swaps with contract senders disabled are answered with
    /// `exchangeable: false` before any validation, as are unsupported pairs.
    /// Invalid input, unknown chains, balance lookup and signing failures are
    /// returned as errors. No offer leaves this function unsigned.
    pub async fn quote(&self, request: &QuoteRequest) -> EngineResult<QuoteResponse> {
        let mode = if request.is_intermediate_swap {
            "intermediate"
        } else {
            "direct"
        };
        let started = Instant::now();

        let result = self.quote_inner(request).await;

        let outcome = match &result {
            Ok(response) if !response.exchangeable => "rejected",
            Ok(response) if response.offers().is_empty() => "empty",
            Ok(_) => "quoted",
            Err(e) if e.is_client_error() => "invalid",
            Err(_) => "error",
        };
        Metrics::quote_request(mode, outcome);
        Metrics::quote_latency(mode, started.elapsed().as_secs_f64() * 1000.0);

        result
    }

    async fn quote_inner(&self, request: &QuoteRequest) -> EngineResult<QuoteResponse> {
        let chain_id = request.chain_id;
        info!(
            chain_id,
            from = %request.from_token.address,
            to = %request.to_token.address,
            sell_amount = %request.sell_amount,
            intermediate = request.is_intermediate_swap,
            "Quote request"
        );

        if request.is_intermediate_swap && !self.features.allow_contract_sender {
            info!(chain_id, "Rejecting intermediate swap, contract sender disabled");
            return Ok(QuoteResponse::rejected(UNSUPPORTED_REQUEST_MESSAGE));
        }

        request.validate().map_err(|e| match e {
            CoreError::InvalidRequest(msg) => EngineError::InvalidRequest(msg),
            other => EngineError::Core(other),
        })?;

        self.chains.get(chain_id)?;

        if !self
            .rates
            .supports(chain_id, request.from_token.address, request.to_token.address)
        {
            info!(
                chain_id,
                from = %request.from_token.address,
                to = %request.to_token.address,
                "Rejecting unsupported token pair"
            );
            return Ok(QuoteResponse::rejected(UNSUPPORTED_PAIR_MESSAGE));
        }

        let built = self.builder.build_offers(request).await?;

        let mut offers = Vec::with_capacity(built.len());
        for BuiltOffer { kind, mut offer } in built {
            if let Err(e) = self.signer.sign_offer(chain_id, &mut offer).await {
                warn!(chain_id, %kind, error = %e, "Offer signing failed");
                return Err(e.into());
            }
            info!(
                chain_id,
                %kind,
                taker = %offer.taker,
                taker_token = %offer.taker_token,
                taker_amount = %offer.taker_token_amount,
                maker_token = %offer.maker_token,
                maker_amount = %offer.maker_token_amount,
                flags = %offer.flags.encode(),
                expiry = offer.expiry,
                "Offer issued"
            );
            Metrics::offer_issued(kind.as_str());
            offers.push(offer);
        }

        if offers.is_empty() {
            debug!(chain_id, "No fillable offer for request");
        }
        Ok(QuoteResponse::quoted(offers))
    }
}
