//! Application wiring and lifecycle.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use rfq_chain::RpcBalanceOracle;
use rfq_engine::{DynBalanceOracle, OsSaltSource, QuoteOrchestrator, SystemClock};
use rfq_server::{create_router, AppState};
use rfq_signer::{KeyManager, OfferSigner};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Running market maker: configuration plus the shared quote state.
pub struct Application {
    config: AppConfig,
    state: AppState,
}

impl Application {
    /// Load the maker key and connect the RPC balance oracle.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;

        let key_manager =
            KeyManager::load(&config.signer.key_source(), config.signer.expected_address)?;
        let chains = config.chain_registry()?;
        let oracle: DynBalanceOracle = Arc::new(RpcBalanceOracle::new(&chains)?);

        Self::with_components(config, key_manager, oracle)
    }

    /// Wire the application around an already loaded key and a balance oracle.
    pub fn with_components(
        config: AppConfig,
        key_manager: KeyManager,
        oracle: DynBalanceOracle,
    ) -> AppResult<Self> {
        let chains = Arc::new(config.chain_registry()?);
        let rates = Arc::new(config.rate_table(&chains)?);
        let signer = Arc::new(OfferSigner::new(Arc::new(key_manager), chains.clone()));

        info!(
            maker = %signer.maker_address(),
            chains = ?chains.chain_ids().collect::<Vec<_>>(),
            pairs = rates.len(),
            allow_contract_sender = config.features.allow_contract_sender,
            allow_partial_fill = config.features.allow_partial_fill,
            expiry_secs = config.offer.expiry_secs,
            "Market maker configured"
        );

        let orchestrator = QuoteOrchestrator::new(
            &config.engine_config(),
            chains,
            rates,
            oracle,
            signer,
            Arc::new(SystemClock),
            Arc::new(OsSaltSource),
        );

        Ok(Self {
            config,
            state: AppState::new(Arc::new(orchestrator)),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Serve quotes until Ctrl-C.
    pub async fn run(self) -> AppResult<()> {
        self.run_until(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    error!(error = %e, "Failed to listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
    }

    /// Serve quotes until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(listen_addr = %self.config.server.listen_addr, "Starting quote server");
        rfq_server::serve(&self.config.server, self.state, shutdown).await?;
        info!("Shutting down");
        Ok(())
    }
}
