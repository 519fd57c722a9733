use super::outcome::RecordedOutcome;
use crate::error::Result;
use async_trait::async_trait;

/// Where verified payment outcomes are kept, keyed by `uppTransactionId`.
#[async_trait]
pub trait OutcomeStore: Send + Sync {
    /// Records `record` unless its transaction is already known.
    ///
    /// Check and insert happen atomically. Returns the record that was already
    /// stored, or `None` when `record` was inserted.
    async fn store_if_absent(&self, record: RecordedOutcome) -> Result<Option<RecordedOutcome>>;
    async fn get(&self, transaction_id: &str) -> Result<Option<RecordedOutcome>>;
    async fn get_all(&self) -> Result<Vec<RecordedOutcome>>;
}

pub type OutcomeStoreBox = Box<dyn OutcomeStore>;
