//! Quote endpoint payloads.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::decimal::{HumanAmount, MAX_DECIMALS};
use crate::error::{CoreError, Result};
use crate::offer::Offer;
use crate::token::TokenInfo;

/// Message returned when an intermediate swap is requested but contract senders are disabled.
pub const UNSUPPORTED_REQUEST_MESSAGE: &str = "unsupported quote request";
/// Message returned when the rate table has no entry for the pair.
pub const UNSUPPORTED_PAIR_MESSAGE: &str = "unsupported token pair";

/// Inbound quote request. `sell_amount` is in human units of `from_token`,
/// kept exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub chain_id: u64,
    pub from_token: TokenInfo,
    pub to_token: TokenInfo,
    pub sell_amount: HumanAmount,
    pub fee_factor: u64,
    pub user_address: Address,
    #[serde(default)]
    pub is_intermediate_swap: bool,
}

impl QuoteRequest {
    /// Check the request invariants: positive sell amount, distinct tokens,
    /// decimals within range.
    pub fn validate(&self) -> Result<()> {
        if !self.sell_amount.is_positive() {
            return Err(CoreError::InvalidRequest(format!(
                "sellAmount must be positive, got {}",
                self.sell_amount
            )));
        }
        if self.from_token.address == self.to_token.address {
            return Err(CoreError::InvalidRequest(
                "fromToken and toToken must differ".to_string(),
            ));
        }
        for token in [&self.from_token, &self.to_token] {
            if token.decimals > MAX_DECIMALS {
                return Err(CoreError::InvalidRequest(format!(
                    "token {} has unsupported decimals {}",
                    token.address, token.decimals
                )));
            }
        }
        Ok(())
    }

    /// Requested sell amount in base units of `from_token`.
    pub fn sell_amount_base_units(&self) -> Result<U256> {
        self.sell_amount.to_base_units(self.from_token.decimals)
    }
}

/// Quote endpoint response.
///
/// `exchangeable: true` with an empty `offers` list is a valid answer
/// meaning "no fillable offer".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub exchangeable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<Offer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QuoteResponse {
    pub fn quoted(offers: Vec<Offer>) -> Self {
        Self {
            exchangeable: true,
            offers: Some(offers),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            exchangeable: false,
            offers: None,
            message: Some(message.into()),
        }
    }

    /// Offers carried by the response (empty when rejected).
    pub fn offers(&self) -> &[Offer] {
        self.offers.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST_JSON: &str = r#"{
        "chainId": 1,
        "fromToken": {"address": "0x0000000000000000000000000000000000000000", "decimals": 18},
        "toToken": {"address": "0xdAC17F958D2ee523a2206206994597C13D831ec7", "decimals": 6},
        "sellAmount": "1.5",
        "feeFactor": 30,
        "userAddress": "0x1111111111111111111111111111111111111111",
        "isIntermediateSwap": false
    }"#;

    #[test]
    fn test_parse_request() {
        let request: QuoteRequest = serde_json::from_str(REQUEST_JSON).unwrap();
        assert_eq!(request.chain_id, 1);
        assert!(request.from_token.is_native());
        assert_eq!(request.to_token.decimals, 6);
        assert_eq!(request.sell_amount.to_string(), "1.5");
        assert_eq!(request.fee_factor, 30);
        assert!(!request.is_intermediate_swap);
        assert!(request.validate().is_ok());
        assert_eq!(
            request.sell_amount_base_units().unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_intermediate_flag_defaults_to_false() {
        let json = REQUEST_JSON.replace(r#","isIntermediateSwap": false"#, "");
        let request: QuoteRequest = serde_json::from_str(&json).unwrap();
        assert!(!request.is_intermediate_swap);
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let mut request: QuoteRequest = serde_json::from_str(REQUEST_JSON).unwrap();
        request.sell_amount = HumanAmount::zero();
        assert!(matches!(request.validate(), Err(CoreError::InvalidRequest(_))));

        request.sell_amount = "-1".parse().unwrap();
        assert!(matches!(request.validate(), Err(CoreError::InvalidRequest(_))));
    }

    #[test]
    fn test_sell_amount_keeps_every_digit() {
        let json = REQUEST_JSON.replace(r#""1.5""#, r#""0.99999999999999999999999999999""#);
        let request: QuoteRequest = serde_json::from_str(&json).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(
            request.sell_amount_base_units().unwrap(),
            U256::from(999_999_999_999_999_999u128)
        );
    }

    #[test]
    fn test_malformed_sell_amount_rejected() {
        let json = REQUEST_JSON.replace(r#""1.5""#, r#""1.5e3""#);
        assert!(serde_json::from_str::<QuoteRequest>(&json).is_err());
    }

    #[test]
    fn test_validate_rejects_same_token() {
        let mut request: QuoteRequest = serde_json::from_str(REQUEST_JSON).unwrap();
        request.to_token = request.from_token;
        assert!(matches!(request.validate(), Err(CoreError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejected_response_shape() {
        let response = QuoteResponse::rejected(UNSUPPORTED_REQUEST_MESSAGE);
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"exchangeable":false,"message":"unsupported quote request"}"#
        );
        assert!(response.offers().is_empty());
    }

    #[test]
    fn test_empty_offer_list_is_preserved() {
        let response = QuoteResponse::quoted(Vec::new());
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"exchangeable":true,"offers":[]}"#);
    }
}
