//! Application configuration.
//!
//! Loaded once at startup from a TOML file, optionally overlaid with
//! `RFQ__`-prefixed environment variables, and never mutated afterwards.

use std::path::PathBuf;

use alloy::primitives::Address;
use rfq_core::{default_chains, ChainConfig, ChainRegistry};
use rfq_engine::{default_rate_entries, EngineConfig, FeatureToggles, OfferConfig, RateEntry, RateTable};
use rfq_server::ServerConfig;
use rfq_signer::KeySource;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default environment variable holding the maker key.
pub const DEFAULT_KEY_ENV_VAR: &str = "MOCK_MM_PRIVATEKEY";

/// Prefix for environment overrides, e.g. `RFQ__FEATURES__ALLOW_CONTRACT_SENDER=true`.
const ENV_PREFIX: &str = "RFQ";

/// Maker key location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Environment variable read when `key_file` is unset.
    #[serde(default = "default_key_env_var")]
    pub key_env_var: String,

    /// File holding the hex key. Takes precedence over `key_env_var`.
    #[serde(default)]
    pub key_file: Option<PathBuf>,

    /// Refuse to start unless the key derives to this address.
    #[serde(default)]
    pub expected_address: Option<Address>,
}

fn default_key_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.to_string()
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            key_env_var: default_key_env_var(),
            key_file: None,
            expected_address: None,
        }
    }
}

impl SignerConfig {
    pub fn key_source(&self) -> KeySource {
        match &self.key_file {
            Some(path) => KeySource::File { path: path.clone() },
            None => KeySource::EnvVar {
                var_name: self.key_env_var.clone(),
            },
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub features: FeatureToggles,

    #[serde(default)]
    pub offer: OfferConfig,

    #[serde(default)]
    pub signer: SignerConfig,

    /// Per-chain contract and token addresses.
    #[serde(default = "default_chains")]
    pub chains: Vec<ChainConfig>,

    /// Quoted pairs. When absent, every chain gets the stock
    /// wrapped-native/stable rates.
    #[serde(default)]
    pub rates: Option<Vec<RateEntry>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            features: FeatureToggles::default(),
            offer: OfferConfig::default(),
            signer: SignerConfig::default(),
            chains: default_chains(),
            rates: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load `path` (if present) and apply environment overrides.
    pub fn load(path: &str) -> AppResult<Self> {
        if !std::path::Path::new(path).exists() {
            tracing::warn!(path = %path, "Config file not found, using defaults");
        }

        ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(format!("Failed to load config: {e}")))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            features: self.features,
            offer: self.offer.clone(),
        }
    }

    pub fn chain_registry(&self) -> AppResult<ChainRegistry> {
        Ok(ChainRegistry::new(self.chains.clone())?)
    }

    pub fn rate_table(&self, chains: &ChainRegistry) -> AppResult<RateTable> {
        let entries = match &self.rates {
            Some(entries) => entries.clone(),
            None => default_rate_entries(chains),
        };
        Ok(RateTable::new(entries, chains)?)
    }

    /// Fail fast on anything that would otherwise surface mid-request.
    pub fn validate(&self) -> AppResult<()> {
        self.server.socket_addr()?;

        if self.offer.expiry_secs == 0 {
            return Err(AppError::Config("offer.expiry_secs must be positive".to_string()));
        }
        if self.features.allow_partial_fill && !self.features.allow_contract_sender {
            tracing::warn!("allow_partial_fill has no effect without allow_contract_sender");
        }

        let chains = self.chain_registry()?;
        let rates = self.rate_table(&chains)?;
        if rates.is_empty() {
            return Err(AppError::Config("no quotable pairs configured".to_string()));
        }
        Ok(())
    }
}
