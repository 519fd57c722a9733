use crate::domain::config::SigningConfig;
use crate::domain::outcome::{Decline, Outcome, TransactionOutcomeMapper};
use crate::domain::request::{AuthorizeParams, HiddenField, TransactionRequest};
use crate::domain::response::TransactionResponse;
use crate::domain::signature::SignatureVerifier;
use crate::error::Result;
use std::sync::Arc;

/// One payment attempt through the hosted payment page.
///
/// Build it from the merchant configuration and the order parameters, render
/// [`hidden_fields`](Self::hidden_fields) into the checkout page, then feed the
/// notification the gateway posts back into [`authorize`](Self::authorize).
#[derive(Debug, Clone)]
pub struct WebTransaction {
    config: Arc<SigningConfig>,
    request: TransactionRequest,
    outcome: Option<Outcome>,
}

impl WebTransaction {
    pub fn new(config: Arc<SigningConfig>, params: AuthorizeParams) -> Result<Self> {
        let request = TransactionRequest::new(&config, params)?;
        tracing::debug!(request = %request, "Prepared authorize request");
        Ok(Self {
            config,
            request,
            outcome: None,
        })
    }

    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    /// The primary-key `sign` value sent with the form.
    pub fn signature(&self) -> &str {
        self.request.signature()
    }

    pub fn hidden_fields(&self) -> Vec<HiddenField> {
        self.request.hidden_fields()
    }

    /// Where the form must be POSTed for the configured environment.
    pub fn authorize_url(&self) -> &'static str {
        self.config.environment().web_authorize_url()
    }

    /// Verifies the gateway's response and reports whether the payment was authorized.
    ///
    /// A declined or cancelled payment is `Ok(false)`; the decline reasons are then
    /// available through the `error_*` accessors. A response whose signature does not
    /// verify fails with [`GatewayError::InvalidSignature`](crate::error::GatewayError)
    /// and leaves this transaction without an outcome.
    pub fn authorize(&mut self, response: &TransactionResponse) -> Result<bool> {
        SignatureVerifier::new(&self.config).ensure_authentic(response)?;
        let outcome = TransactionOutcomeMapper::map(response)?;
        let authorized = outcome.is_authorized();

        tracing::info!(
            refno = self.request.refno(),
            transaction_id = response.transaction_id().unwrap_or_default(),
            status = outcome.status(),
            "Authorize response processed"
        );

        self.outcome = Some(outcome);
        Ok(authorized)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn error_code(&self) -> Option<&str> {
        self.decline_field(|d| &d.error_code)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.decline_field(|d| &d.error_message)
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.decline_field(|d| &d.error_detail)
    }

    fn decline_field<F>(&self, field: F) -> Option<&str>
    where
        F: FnOnce(&Decline) -> &String,
    {
        self.outcome
            .as_ref()
            .and_then(Outcome::decline)
            .map(|d| field(d).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{Environment, SignKey};
    use crate::error::GatewayError;

    fn transaction() -> WebTransaction {
        let config = SigningConfig::new(
            "1100000000",
            SignKey::from_hex("d777c17ba2010282c2d2350a68b441ca07a799d294bfaa630b7c8442207c0b69703cc55775b0ca5a4e455b818a9bb10a43669c0c20ce31f4a43f10e0cabb9525").unwrap(),
            None,
            Environment::Test,
        )
        .unwrap();
        WebTransaction::new(
            Arc::new(config),
            AuthorizeParams {
                refno: "ABCDEF".to_string(),
                amount: 1000,
                currency: "CHF".to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_transaction_has_no_outcome() {
        let tx = transaction();
        assert_eq!(tx.signature(), "0402fb3fba8c6fcb40df9b7756e7e637");
        assert!(tx.authorize_url().starts_with("https://pilot."));
        assert!(tx.outcome().is_none());
        assert!(tx.error_code().is_none());
    }

    #[test]
    fn test_invalid_signature_leaves_no_outcome() {
        let mut tx = transaction();
        let response: TransactionResponse = [
            ("status", "success"),
            ("amount", "1000"),
            ("currency", "CHF"),
            ("uppTransactionId", "110808173520119430"),
            ("sign2", "invalid"),
        ]
        .into_iter()
        .collect();

        assert!(matches!(
            tx.authorize(&response),
            Err(GatewayError::InvalidSignature)
        ));
        assert!(tx.outcome().is_none());
    }

    #[test]
    fn test_cancelled_payment_is_not_authorized() {
        let mut tx = transaction();
        let response: TransactionResponse = [
            ("status", "cancel"),
            ("amount", "1000"),
            ("currency", "CHF"),
            ("uppTransactionId", "110808173520119430"),
            ("sign2", "a9571428be4d9d37b88988656984bfbf"),
        ]
        .into_iter()
        .collect();

        assert!(!tx.authorize(&response).unwrap());
        assert_eq!(tx.outcome(), Some(&Outcome::Cancelled));
        assert!(tx.error_code().is_none());
    }
}
