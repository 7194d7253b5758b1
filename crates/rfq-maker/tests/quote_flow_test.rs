//! End-to-end quote flow through the HTTP router.
//!
//! Run with: cargo test -p rfq-maker --test quote_flow_test

mod integration;

use alloy::primitives::{address, Address, U256};
use axum::http::StatusCode;
use integration::{eth_to_stable, token_request, TestMaker, USER};
use rfq_core::{OfferFlags, FLAG_ALLOW_CONTRACT_SENDER, FLAG_ALLOW_PARTIAL_FILL};
use rfq_maker::{AppConfig, AppError, Application};
use serde_json::json;

const MAKER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

fn bit(position: usize) -> U256 {
    U256::from(1u8) << position
}

fn contract_sender_config(allow_partial_fill: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.features.allow_contract_sender = true;
    config.features.allow_partial_fill = allow_partial_fill;
    config
}

#[tokio::test]
async fn test_full_fill_direct_offer() {
    let maker = TestMaker::new(AppConfig::default()).with_stable_balance(1, 5_000_000_000);
    let request = eth_to_stable(&maker.chains, 1, "1");

    let response = maker.quote(request).await;
    assert!(response.exchangeable);
    assert_eq!(response.offers().len(), 1);

    let offer = &response.offers()[0];
    assert_eq!(offer.taker, USER.parse::<Address>().unwrap());
    assert_eq!(offer.maker, MAKER);
    assert_eq!(offer.taker_token, Address::ZERO);
    assert_eq!(offer.maker_token, maker.chains.stable_asset(1).unwrap());
    assert_eq!(offer.taker_token_amount, U256::from(10u64).pow(U256::from(18)));
    assert_eq!(offer.maker_token_amount, U256::from(3_100_000_000u64));
    assert_eq!(offer.flags, OfferFlags::NONE);
    assert!(maker.verifier.verify(1, offer).unwrap());

    // Balance is read for the maker on the stable token.
    let calls = maker.oracle.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].owner, MAKER);
}

#[tokio::test]
async fn test_clamped_quote_without_contract_sender_is_empty() {
    let maker = TestMaker::new(AppConfig::default()).with_stable_balance(1, 1_000_000_000);

    let response = maker.quote(eth_to_stable(&maker.chains, 1, "1")).await;
    assert!(response.exchangeable);
    assert!(response.offers().is_empty());
}

#[tokio::test]
async fn test_clamped_quote_yields_router_offer() {
    let maker = TestMaker::new(contract_sender_config(false)).with_stable_balance(1, 1_000_000_000);

    let response = maker.quote(eth_to_stable(&maker.chains, 1, "1")).await;
    assert_eq!(response.offers().len(), 1);

    let offer = &response.offers()[0];
    assert_eq!(offer.taker, maker.chains.router(1).unwrap());
    assert_eq!(offer.taker_token, maker.chains.wrapped_native(1).unwrap());
    assert_eq!(offer.maker_token_amount, U256::from(1_000_000_000u64));
    assert_eq!(offer.taker_token_amount, U256::from(322_580_645_161_290_322u64));
    assert_eq!(offer.fee_factor, U256::ZERO);
    assert_eq!(offer.flags.encode(), bit(FLAG_ALLOW_CONTRACT_SENDER));
    assert!(maker.verifier.verify(1, offer).unwrap());
}

#[tokio::test]
async fn test_direct_and_router_offers_with_partial_fill() {
    let maker = TestMaker::new(contract_sender_config(true)).with_stable_balance(1, 5_000_000_000);

    let (status, raw) = maker.post("/quote", eth_to_stable(&maker.chains, 1, "1")).await;
    assert_eq!(status, StatusCode::OK);

    let offers = raw["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0]["flags"], "0");
    assert_eq!(
        offers[1]["flags"],
        (bit(FLAG_ALLOW_CONTRACT_SENDER) | bit(FLAG_ALLOW_PARTIAL_FILL)).to_string()
    );
    for offer in offers {
        assert_eq!(offer["makerTokenAmount"], "3100000000");
        assert_eq!(offer["takerTokenAmount"], "1000000000000000000");
    }

    let response: rfq_core::QuoteResponse = serde_json::from_value(raw).unwrap();
    for offer in response.offers() {
        assert!(maker.verifier.verify(1, offer).unwrap());
    }
}

#[tokio::test]
async fn test_stable_to_eth_quote() {
    let maker = TestMaker::new(AppConfig::default());
    let weth = maker.chains.wrapped_native(1).unwrap();
    maker.oracle.set_balance(1, weth, U256::from(10u64).pow(U256::from(18)));

    let request = token_request(
        1,
        (maker.chains.stable_asset(1).unwrap(), 6),
        (Address::ZERO, 18),
        "100",
    );
    let response = maker.quote(request).await;
    assert_eq!(response.offers().len(), 1);

    let offer = &response.offers()[0];
    assert_eq!(offer.taker_token_amount, U256::from(100_000_000u64));
    // 100 * 0.0004 ETH
    assert_eq!(offer.maker_token_amount, U256::from(40_000_000_000_000_000u64));
    assert_eq!(maker.oracle.calls()[0].token, weth);
}

#[tokio::test]
async fn test_sell_amount_precision_is_exact() {
    let maker = TestMaker::new(AppConfig::default()).with_stable_balance(1, u64::MAX);

    // 29 fractional nines truncate to 18 decimals, never round up to 1 ETH
    let response = maker
        .quote(eth_to_stable(&maker.chains, 1, "0.99999999999999999999999999999"))
        .await;
    assert_eq!(response.offers().len(), 1);
    assert_eq!(
        response.offers()[0].taker_token_amount,
        U256::from(999_999_999_999_999_999u64)
    );
    assert_eq!(response.offers()[0].maker_token_amount, U256::from(3_099_999_999u64));
}

#[tokio::test]
async fn test_large_sell_amount_is_quoted() {
    let maker = TestMaker::new(AppConfig::default());
    maker
        .oracle
        .set_balance(1, maker.chains.stable_asset(1).unwrap(), U256::MAX);

    let (status, raw) = maker
        .post("/quote", eth_to_stable(&maker.chains, 1, "100000000000"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(raw["offers"][0]["takerTokenAmount"], "100000000000000000000000000000");
    assert_eq!(raw["offers"][0]["makerTokenAmount"], "310000000000000000000");
}

#[tokio::test]
async fn test_intermediate_swap() {
    let disabled = TestMaker::new(AppConfig::default()).with_stable_balance(1, 5_000_000_000);
    let mut request = eth_to_stable(&disabled.chains, 1, "1");
    request["isIntermediateSwap"] = json!(true);

    let (status, raw) = disabled.post("/quote", request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(raw, json!({"exchangeable": false, "message": "unsupported quote request"}));
    assert_eq!(disabled.oracle.call_count(), 0);

    let enabled = TestMaker::new(contract_sender_config(false)).with_stable_balance(1, 5_000_000_000);
    let response = enabled.quote(request).await;
    assert_eq!(response.offers().len(), 1);

    let offer = &response.offers()[0];
    assert_eq!(offer.taker, enabled.chains.router(1).unwrap());
    assert_eq!(offer.taker_token, enabled.chains.wrapped_native(1).unwrap());
    assert!(enabled.verifier.verify(1, offer).unwrap());
}

#[tokio::test]
async fn test_unsupported_pair() {
    let maker = TestMaker::new(AppConfig::default());
    let request = token_request(
        1,
        (maker.chains.stable_asset(1).unwrap(), 6),
        (address!("6B175474E89094C44Da98b954EedeAC495271d0F"), 18),
        "10",
    );

    let (status, raw) = maker.post("/quote", request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(raw["exchangeable"], false);
    assert_eq!(raw["message"], "unsupported token pair");
    assert_eq!(maker.oracle.call_count(), 0);
}

#[tokio::test]
async fn test_signatures_are_chain_bound() {
    let maker = TestMaker::new(AppConfig::default()).with_stable_balance(11155111, 5_000_000_000);

    let response = maker.quote(eth_to_stable(&maker.chains, 11155111, "1")).await;
    let offer = &response.offers()[0];
    assert!(maker.verifier.verify(11155111, offer).unwrap());
    assert!(!maker.verifier.verify(1, offer).unwrap());
}

#[tokio::test]
async fn test_settlement_notifications() {
    let maker = TestMaker::new(AppConfig::default());

    for uri in ["/deal", "/exception"] {
        let (status, raw) = maker.post(uri, json!({"quoteId": "q-1"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(raw, json!({"result": true, "message": "ok"}));
    }
}

#[test]
fn test_application_without_key_fails() {
    let mut config = AppConfig::default();
    config.signer.key_env_var = "RFQ_MAKER_TEST_UNSET_KEY".to_string();

    let result = Application::new(config);
    assert!(matches!(result, Err(AppError::Key(_))));
}

#[tokio::test]
async fn test_application_without_rpc_endpoint_fails_per_request() {
    std::env::set_var("RFQ_MAKER_TEST_KEY", integration::TEST_PRIVATE_KEY);
    let mut config = AppConfig::default();
    config.signer.key_env_var = "RFQ_MAKER_TEST_KEY".to_string();
    config.signer.expected_address = Some(MAKER);

    let app = Application::new(config).unwrap();
    let chains = app.config().chain_registry().unwrap();
    let maker = TestMaker {
        router: app.router(),
        oracle: std::sync::Arc::new(rfq_engine::MockBalanceOracle::new()),
        verifier: rfq_signer::OfferSigner::new(
            std::sync::Arc::new(integration::key_manager()),
            std::sync::Arc::new(chains.clone()),
        ),
        chains,
    };

    let (status, raw) = maker.post("/quote", eth_to_stable(&maker.chains, 1, "1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(raw["error"]
        .as_str()
        .unwrap()
        .contains("No balance source configured for chain 1"));
}
