//! Keyed digests exchanged with the gateway.
//!
//! Both directions use HMAC-MD5 keyed with the hex-decoded sign key, computed
//! over the plain concatenation of a fixed list of field values:
//!
//! | Digest | Fields | Key |
//! |--------|--------|-----|
//! | request `sign` | `merchantId`, `amount`, `currency`, `refno` | primary |
//! | response `sign2` | `merchantId`, `amount`, `currency`, `uppTransactionId` | any configured |
//!
//! Field order and formatting are part of the gateway contract and must not change.

use crate::domain::config::{SignKey, SigningConfig};
use crate::domain::money::{Amount, Currency};
use crate::domain::response::TransactionResponse;
use crate::error::{GatewayError, Result};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::Md5;

type HmacMd5 = Hmac<Md5>;

fn mac_over<S: AsRef<str>>(fields: &[S], key: &SignKey) -> Result<HmacMd5> {
    let mut mac = <HmacMd5 as KeyInit>::new_from_slice(key.as_bytes())
        .map_err(|e| GatewayError::Config(format!("Sign key rejected: {e}")))?;
    for field in fields {
        mac.update(field.as_ref().as_bytes());
    }
    Ok(mac)
}

/// Lower-case hex HMAC-MD5 of the concatenated `fields`.
pub fn sign<S: AsRef<str>>(fields: &[S], key: &SignKey) -> Result<String> {
    Ok(hex::encode(mac_over(fields, key)?.finalize().into_bytes()))
}

/// Signs outbound requests and checks inbound responses for one merchant.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier<'a> {
    config: &'a SigningConfig,
}

impl<'a> SignatureVerifier<'a> {
    pub fn new(config: &'a SigningConfig) -> Self {
        Self { config }
    }

    /// The `sign` field of an outbound authorize request. Always uses the primary key.
    pub fn request_signature(
        &self,
        amount: Amount,
        currency: &Currency,
        refno: &str,
    ) -> Result<String> {
        let amount = amount.to_string();
        sign(
            &[self.config.merchant_id(), amount.as_str(), currency.as_str(), refno],
            self.config.primary_key(),
        )
    }

    /// Checks `sign2` against every configured key.
    ///
    /// Returns `Ok(false)` for a missing, malformed or mismatching signature, and an
    /// error only when one of the signed fields is absent from the response.
    pub fn verify(&self, response: &TransactionResponse) -> Result<bool> {
        let fields = [
            self.config.merchant_id(),
            response.require(TransactionResponse::AMOUNT)?,
            response.require(TransactionResponse::CURRENCY)?,
            response.require(TransactionResponse::TRANSACTION_ID)?,
        ];

        let Some(received) = response.secondary_signature() else {
            tracing::debug!("Response carries no secondary signature");
            return Ok(false);
        };
        let Ok(received) = hex::decode(received) else {
            tracing::debug!("Secondary signature is not hex encoded");
            return Ok(false);
        };

        for (index, key) in self.config.keys().enumerate() {
            if mac_over(&fields, key)?.verify_slice(&received).is_ok() {
                tracing::debug!(key_index = index, "Secondary signature verified");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Like [`verify`](Self::verify) but turns a mismatch into
    /// [`GatewayError::InvalidSignature`].
    pub fn ensure_authentic(&self, response: &TransactionResponse) -> Result<()> {
        if self.verify(response)? {
            Ok(())
        } else {
            tracing::warn!(
                transaction_id = response.transaction_id().unwrap_or_default(),
                "Rejecting response with invalid signature"
            );
            Err(GatewayError::InvalidSignature)
        }
    }
}
