//! EIP-712 signing of RFQ offers.
//!
//! Domain: `{name: "Tokenlon", version: "v6", chainId, verifyingContract: <RFQ contract>}`.
//! The signature is the 65-byte `r || s || v` form with `v` in {27, 28}.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, PrimitiveSignature, B256, U256};
use alloy::signers::Signer as AlloySigner;
use alloy::sol;
use alloy::sol_types::{eip712_domain, Eip712Domain, SolStruct};
use rfq_core::{ChainRegistry, Offer};
use tracing::debug;

use crate::error::{SignerError, SignerResult};
use crate::key::KeyManager;

pub const DOMAIN_NAME: &str = "Tokenlon";
pub const DOMAIN_VERSION: &str = "v6";

sol! {
    #[derive(Debug)]
    struct RFQOffer {
        address taker;
        address maker;
        address takerToken;
        uint256 takerTokenAmount;
        address makerToken;
        uint256 makerTokenAmount;
        uint256 feeFactor;
        uint256 flags;
        uint256 expiry;
        uint256 salt;
    }
}

impl From<&Offer> for RFQOffer {
    fn from(offer: &Offer) -> Self {
        Self {
            taker: offer.taker,
            maker: offer.maker,
            takerToken: offer.taker_token,
            takerTokenAmount: offer.taker_token_amount,
            makerToken: offer.maker_token,
            makerTokenAmount: offer.maker_token_amount,
            feeFactor: offer.fee_factor,
            flags: offer.flags.encode(),
            expiry: U256::from(offer.expiry),
            salt: offer.salt_value(),
        }
    }
}

/// EIP-712 struct hash of the offer's ten signed fields.
pub fn hash_offer(offer: &Offer) -> B256 {
    RFQOffer::from(offer).eip712_hash_struct()
}

/// Output of signing one offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferSignature {
    pub offer_hash: B256,
    pub signature: Bytes,
}

fn encode_signature(signature: &PrimitiveSignature) -> Bytes {
    let mut raw = [0u8; 65];
    raw[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    raw[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
    raw[64] = 27 + u8::from(signature.v());
    Bytes::copy_from_slice(&raw)
}

fn decode_signature(raw: &[u8]) -> SignerResult<PrimitiveSignature> {
    if raw.len() != 65 {
        return Err(SignerError::InvalidSignature(format!(
            "expected 65 bytes, got {}",
            raw.len()
        )));
    }
    let y_parity = match raw[64] {
        0 | 27 => false,
        1 | 28 => true,
        v => return Err(SignerError::InvalidSignature(format!("bad v value {v}"))),
    };
    Ok(PrimitiveSignature::new(
        U256::from_be_slice(&raw[..32]),
        U256::from_be_slice(&raw[32..64]),
        y_parity,
    ))
}

/// Signs offers with the maker key against the chain's RFQ domain.
pub struct OfferSigner {
    key_manager: Arc<KeyManager>,
    chains: Arc<ChainRegistry>,
}

impl OfferSigner {
    pub fn new(key_manager: Arc<KeyManager>, chains: Arc<ChainRegistry>) -> Self {
        Self {
            key_manager,
            chains,
        }
    }

    pub fn maker_address(&self) -> Address {
        self.key_manager.maker_address()
    }

    /// EIP-712 domain for `chain_id`. Fails for chains without an RFQ contract.
    pub fn domain(&self, chain_id: u64) -> SignerResult<Eip712Domain> {
        let verifying_contract = self.chains.rfq_contract(chain_id)?;
        Ok(eip712_domain! {
            name: DOMAIN_NAME,
            version: DOMAIN_VERSION,
            chain_id: chain_id,
            verifying_contract: verifying_contract,
        })
    }

    /// Compute the offer hash and sign the full EIP-712 digest.
    pub async fn sign(&self, chain_id: u64, offer: &Offer) -> SignerResult<OfferSignature> {
        let domain = self.domain(chain_id)?;
        let typed = RFQOffer::from(offer);
        let offer_hash = typed.eip712_hash_struct();
        let signing_hash = typed.eip712_signing_hash(&domain);

        // NOTE: never log the signature itself
        let signature = self.key_manager.signer().sign_hash(&signing_hash).await?;
        debug!(chain_id, %offer_hash, "Offer signed");

        Ok(OfferSignature {
            offer_hash,
            signature: encode_signature(&signature),
        })
    }

    /// Sign and attach `offerHash` / `makerSignature` in place.
    pub async fn sign_offer(&self, chain_id: u64, offer: &mut Offer) -> SignerResult<()> {
        let OfferSignature {
            offer_hash,
            signature,
        } = self.sign(chain_id, offer).await?;
        offer.attach_signature(offer_hash, signature);
        Ok(())
    }

    /// Check that the attached signature recovers to `offer.maker` and that
    /// `offerHash` matches the signed fields.
    pub fn verify(&self, chain_id: u64, offer: &Offer) -> SignerResult<bool> {
        let raw = offer
            .maker_signature
            .as_ref()
            .ok_or(SignerError::MissingSignature)?;
        let signature = decode_signature(raw)?;

        let domain = self.domain(chain_id)?;
        let typed = RFQOffer::from(offer);
        if offer.offer_hash != Some(typed.eip712_hash_struct()) {
            return Ok(false);
        }

        let signing_hash = typed.eip712_signing_hash(&domain);
        match signature.recover_address_from_prehash(&signing_hash) {
            Ok(recovered) => Ok(recovered == offer.maker),
            Err(e) => Err(SignerError::InvalidSignature(e.to_string())),
        }
    }
}
