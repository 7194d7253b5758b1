//! Minimal JSON-RPC client for `eth_call`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChainError, ChainResult};

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

mod erc20 {
    use super::sol;

    sol! {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// ABI-encoded `balanceOf(owner)` call data.
pub fn balance_of_calldata(owner: Address) -> Bytes {
    Bytes::from(erc20::balanceOfCall { owner }.abi_encode())
}

/// Decode a `uint256` return value.
pub fn decode_balance(data: &[u8]) -> ChainResult<U256> {
    if data.len() != 32 {
        return Err(ChainError::InvalidResponse(format!(
            "unexpected balanceOf response length: expected 32 bytes, got {}",
            data.len()
        )));
    }
    let mut buf = [0u8; 32];
    buf.copy_from_slice(data);
    Ok(U256::from_be_bytes(buf))
}

#[derive(Debug, Serialize)]
struct CallParams {
    to: Address,
    data: Bytes,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallParams, &'a str),
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Bytes>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// JSON-RPC client bound to one endpoint.
#[derive(Debug)]
pub struct RpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> ChainResult<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> ChainResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `eth_call` against the latest block.
    pub async fn eth_call(&self, to: Address, data: Bytes) -> ChainResult<Bytes> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: "eth_call",
            params: (CallParams { to, data }, "latest"),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ChainError::HttpClient(format!("Failed to read response: {e}")))?;
        let parsed: RpcResponse = serde_json::from_slice(&body)?;

        if let Some(error) = parsed.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = parsed
            .result
            .ok_or_else(|| ChainError::InvalidResponse("missing result".to_string()))?;
        debug!(id = request.id, len = result.len(), "eth_call returned");
        Ok(result)
    }
}
