use crate::domain::outcome::RecordedOutcome;
use crate::domain::ports::OutcomeStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for recorded outcomes.
///
/// Uses `Arc<RwLock<BTreeMap<String, RecordedOutcome>>>`, so `get_all` returns
/// records ordered by transaction id. Suited to tests and one-shot batch runs.
#[derive(Default, Clone)]
pub struct InMemoryOutcomeStore {
    outcomes: Arc<RwLock<BTreeMap<String, RecordedOutcome>>>,
}

impl InMemoryOutcomeStore {
    /// Creates a new, empty in-memory outcome store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OutcomeStore for InMemoryOutcomeStore {
    async fn store_if_absent(&self, record: RecordedOutcome) -> Result<Option<RecordedOutcome>> {
        let mut outcomes = self.outcomes.write().await;
        match outcomes.entry(record.transaction_id.clone()) {
            Entry::Occupied(existing) => Ok(Some(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(None)
            }
        }
    }

    async fn get(&self, transaction_id: &str) -> Result<Option<RecordedOutcome>> {
        let outcomes = self.outcomes.read().await;
        Ok(outcomes.get(transaction_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<RecordedOutcome>> {
        let outcomes = self.outcomes.read().await;
        Ok(outcomes.values().cloned().collect())
    }
}
