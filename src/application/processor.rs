use crate::domain::config::SigningConfig;
use crate::domain::outcome::{RecordedOutcome, TransactionOutcomeMapper};
use crate::domain::ports::OutcomeStoreBox;
use crate::domain::response::TransactionResponse;
use crate::domain::signature::SignatureVerifier;
use crate::error::Result;
use std::sync::Arc;

/// Entry point for the gateway's server-to-server notifications.
///
/// `NotificationProcessor` verifies each notification, maps it to an outcome and
/// records it exactly once per `uppTransactionId`. The gateway retries delivery
/// until it gets a 200, so the same notification can arrive several times.
pub struct NotificationProcessor {
    config: Arc<SigningConfig>,
    outcome_store: OutcomeStoreBox,
}

impl NotificationProcessor {
    /// Creates a new `NotificationProcessor` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - The merchant's signing configuration.
    /// * `outcome_store` - The store verified outcomes are recorded in.
    pub fn new(config: Arc<SigningConfig>, outcome_store: OutcomeStoreBox) -> Self {
        Self {
            config,
            outcome_store,
        }
    }

    /// Verifies, maps and records one notification.
    ///
    /// Returns the record kept for the transaction. For a redelivered notification
    /// that is the record stored the first time. Notifications that fail signature
    /// verification are rejected before anything is read from or written to the store.
    pub async fn process_notification(
        &self,
        response: TransactionResponse,
    ) -> Result<RecordedOutcome> {
        SignatureVerifier::new(&self.config).ensure_authentic(&response)?;
        let outcome = TransactionOutcomeMapper::map(&response)?;
        let record = RecordedOutcome::from_response(&response, outcome)?;

        match self.outcome_store.store_if_absent(record.clone()).await? {
            Some(existing) => {
                tracing::warn!(
                    transaction_id = %record.transaction_id,
                    "Ignoring redelivered notification"
                );
                Ok(existing)
            }
            None => {
                tracing::info!(
                    transaction_id = %record.transaction_id,
                    refno = record.refno.as_deref().unwrap_or_default(),
                    status = record.outcome.status(),
                    "Recorded payment outcome"
                );
                Ok(record)
            }
        }
    }

    /// Consumes the processor and returns every recorded outcome.
    pub async fn into_results(self) -> Result<Vec<RecordedOutcome>> {
        self.outcome_store.get_all().await
    }
}
