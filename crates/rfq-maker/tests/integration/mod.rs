//! Shared helpers for end-to-end quote tests.

#![allow(dead_code)]

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rfq_core::{ChainRegistry, QuoteResponse};
use rfq_engine::MockBalanceOracle;
use rfq_maker::{AppConfig, Application};
use rfq_signer::{KeyManager, OfferSigner};
use serde_json::Value;
use tower::ServiceExt;

/// Anvil account #0.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const USER: &str = "0x1111111111111111111111111111111111111111";

pub fn key_manager() -> KeyManager {
    KeyManager::from_secret_bytes(&hex::decode(TEST_PRIVATE_KEY).unwrap(), None).unwrap()
}

pub struct TestMaker {
    pub router: Router,
    pub oracle: Arc<MockBalanceOracle>,
    pub chains: ChainRegistry,
    pub verifier: OfferSigner,
}

impl TestMaker {
    pub fn new(config: AppConfig) -> Self {
        let oracle = Arc::new(MockBalanceOracle::new());
        let chains = config.chain_registry().unwrap();
        let app = Application::with_components(config, key_manager(), oracle.clone()).unwrap();
        let verifier = OfferSigner::new(Arc::new(key_manager()), Arc::new(chains.clone()));

        Self {
            router: app.router(),
            oracle,
            chains,
            verifier,
        }
    }

    pub fn with_stable_balance(self, chain_id: u64, balance: u64) -> Self {
        let stable = self.chains.stable_asset(chain_id).unwrap();
        self.oracle.set_balance(chain_id, stable, U256::from(balance));
        self
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn quote(&self, body: Value) -> QuoteResponse {
        let (status, raw) = self.post("/quote", body).await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {raw}");
        serde_json::from_value(raw).unwrap()
    }
}

/// Sell `sell_amount` of native ETH for the chain's stable asset.
pub fn eth_to_stable(chains: &ChainRegistry, chain_id: u64, sell_amount: &str) -> Value {
    token_request(
        chain_id,
        (Address::ZERO, 18),
        (chains.stable_asset(chain_id).unwrap(), 6),
        sell_amount,
    )
}

pub fn token_request(
    chain_id: u64,
    from: (Address, u8),
    to: (Address, u8),
    sell_amount: &str,
) -> Value {
    serde_json::json!({
        "chainId": chain_id,
        "fromToken": {"address": from.0, "decimals": from.1},
        "toToken": {"address": to.0, "decimals": to.1},
        "sellAmount": sell_amount,
        "feeFactor": 0,
        "userAddress": USER,
        "isIntermediateSwap": false
    })
}
