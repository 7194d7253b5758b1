//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Process-wide feature switches, fixed at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggles {
    /// Allow offers whose taker is the router contract. Enables router
    /// offers in direct mode and intermediate-swap quoting.
    #[serde(default)]
    pub allow_contract_sender: bool,

    /// Add the partial-fill bit to contract-sender offers.
    #[serde(default)]
    pub allow_partial_fill: bool,
}

/// Offer parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferConfig {
    /// Seconds until an issued offer expires.
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,
}

fn default_expiry_secs() -> u64 {
    300
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            expiry_secs: default_expiry_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub features: FeatureToggles,
    #[serde(default)]
    pub offer: OfferConfig,
}
