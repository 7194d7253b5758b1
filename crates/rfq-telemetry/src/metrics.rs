//! Prometheus metrics for the RFQ market maker.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, which is a startup bug; it can only happen during static
//! initialization.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec, Encoder,
    HistogramVec, IntCounter, TextEncoder,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Quote requests by mode (direct/intermediate) and outcome
/// (quoted/empty/rejected/invalid/error).
pub static QUOTE_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "rfq_quote_requests_total",
        "Total quote requests by mode and outcome",
        &["mode", "outcome"]
    )
    .unwrap()
});

/// Signed offers returned to takers.
/// Labels: kind (direct/router/intermediate)
pub static OFFERS_ISSUED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "rfq_offers_issued_total",
        "Total signed offers issued",
        &["kind"]
    )
    .unwrap()
});

/// Quotes reduced to the maker's available balance.
pub static BALANCE_CLAMPS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "rfq_balance_clamps_total",
        "Total quotes clamped to the maker inventory"
    )
    .unwrap()
});

/// Balance lookups that failed.
pub static ORACLE_FAILURES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "rfq_oracle_failures_total",
        "Total failed balance lookups",
        &["chain_id"]
    )
    .unwrap()
});

/// End-to-end quote latency in milliseconds.
pub static QUOTE_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "rfq_quote_latency_ms",
        "Quote handling latency in milliseconds",
        &["mode"],
        vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    pub fn quote_request(mode: &str, outcome: &str) {
        QUOTE_REQUESTS_TOTAL
            .with_label_values(&[mode, outcome])
            .inc();
    }

    pub fn offer_issued(kind: &str) {
        OFFERS_ISSUED_TOTAL.with_label_values(&[kind]).inc();
    }

    pub fn balance_clamped() {
        BALANCE_CLAMPS_TOTAL.inc();
    }

    pub fn oracle_failure(chain_id: u64) {
        ORACLE_FAILURES_TOTAL
            .with_label_values(&[&chain_id.to_string()])
            .inc();
    }

    pub fn quote_latency(mode: &str, latency_ms: f64) {
        QUOTE_LATENCY_MS
            .with_label_values(&[mode])
            .observe(latency_ms);
    }

    /// Render the default registry in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&prometheus::gather(), &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
