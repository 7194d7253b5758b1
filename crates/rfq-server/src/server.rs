//! HTTP server implementation using axum.

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use rfq_engine::QuoteOrchestrator;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handlers;

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<QuoteOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<QuoteOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &QuoteOrchestrator {
        &self.orchestrator
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote", post(handlers::quote))
        .route("/deal", post(handlers::deal))
        .route("/exception", post(handlers::exception))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Quote server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Quote server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use rfq_core::{default_chains, ChainRegistry, QuoteResponse};
    use rfq_engine::{
        default_rate_entries, EngineConfig, MockBalanceOracle, OsSaltSource, RateTable,
        SystemClock,
    };
    use rfq_signer::{KeyManager, OfferSigner};
    use serde_json::Value;
    use tower::ServiceExt;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_router(balance: u64) -> Router {
        let chains = Arc::new(ChainRegistry::new(default_chains()).unwrap());
        let rates = Arc::new(RateTable::new(default_rate_entries(&chains), &chains).unwrap());
        let oracle = Arc::new(MockBalanceOracle::new());
        oracle.set_balance(1, chains.stable_asset(1).unwrap(), U256::from(balance));

        let key = KeyManager::from_secret_bytes(&hex::decode(TEST_PRIVATE_KEY).unwrap(), None)
            .unwrap();
        let signer = Arc::new(OfferSigner::new(Arc::new(key), chains.clone()));
        let orchestrator = QuoteOrchestrator::new(
            &EngineConfig::default(),
            chains,
            rates,
            oracle,
            signer,
            Arc::new(SystemClock),
            Arc::new(OsSaltSource),
        );
        create_router(AppState::new(Arc::new(orchestrator)))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const QUOTE_BODY: &str = r#"{
        "chainId": 1,
        "fromToken": {"address": "0x0000000000000000000000000000000000000000", "decimals": 18},
        "toToken": {"address": "0xdac17f958d2ee523a2206206994597c13d831ec7", "decimals": 6},
        "sellAmount": "1",
        "feeFactor": 0,
        "userAddress": "0x1111111111111111111111111111111111111111",
        "isIntermediateSwap": false
    }"#;

    #[tokio::test]
    async fn test_quote_endpoint() {
        let app = test_router(5_000_000_000);

        let response = app.oneshot(json_post("/quote", QUOTE_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let quote: QuoteResponse = serde_json::from_slice(&body).unwrap();
        assert!(quote.exchangeable);
        assert_eq!(quote.offers().len(), 1);

        let raw: Value = serde_json::from_slice(&body).unwrap();
        let offer = &raw["offers"][0];
        assert_eq!(offer["takerTokenAmount"], "1000000000000000000");
        assert_eq!(offer["makerTokenAmount"], "3100000000");
        assert_eq!(offer["flags"], "0");
        assert_eq!(offer["salt"].as_str().unwrap().len(), 66);
        assert_eq!(offer["offerHash"].as_str().unwrap().len(), 66);
        assert_eq!(offer["makerSignature"].as_str().unwrap().len(), 132);
    }

    #[tokio::test]
    async fn test_intermediate_quote_rejected() {
        let app = test_router(5_000_000_000);
        let body = QUOTE_BODY.replace(r#""isIntermediateSwap": false"#, r#""isIntermediateSwap": true"#);

        let response = app.oneshot(json_post("/quote", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let raw: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(raw["exchangeable"], false);
        assert_eq!(raw["message"], "unsupported quote request");
        assert!(raw.get("offers").is_none());
    }

    #[tokio::test]
    async fn test_invalid_quote_is_bad_request() {
        let app = test_router(5_000_000_000);
        let body = QUOTE_BODY.replace(r#""sellAmount": "1""#, r#""sellAmount": "0""#);

        let response = app.oneshot(json_post("/quote", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_chain_is_server_error() {
        let app = test_router(5_000_000_000);
        let body = QUOTE_BODY.replace(r#""chainId": 1"#, r#""chainId": 56"#);

        let response = app.oneshot(json_post("/quote", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_deal_and_exception_acknowledged() {
        for uri in ["/deal", "/exception"] {
            let app = test_router(0);
            let response = app
                .oneshot(json_post(uri, r#"{"quoteId":"abc","status":"filled"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let ack: handlers::Ack = serde_json::from_slice(&body).unwrap();
            assert_eq!(ack, handlers::Ack::ok());
        }
    }

    #[tokio::test]
    async fn test_health_and_metrics() {
        let app = test_router(0);
        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
