//! Record of experiences seen by users, backing `once` frequency rules.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// A user has seen an experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRecord {
    #[allow(missing_docs)]
    pub experience_id: String,
    #[allow(missing_docs)]
    pub user_id: String,
    #[allow(missing_docs)]
    pub seen_at: DateTime<Utc>,
}

impl ViewRecord {
    /// Record a view happening now.
    pub fn now(experience_id: impl Into<String>, user_id: impl Into<String>) -> ViewRecord {
        ViewRecord {
            experience_id: experience_id.into(),
            user_id: user_id.into(),
            seen_at: Utc::now(),
        }
    }
}

/// Append-only store of view records. Durable implementations live with the host application.
///
/// Readers may observe counts that do not include concurrent inserts yet.
#[async_trait]
pub trait RulesStore: Send + Sync {
    /// Append a view record.
    async fn insert(&self, record: ViewRecord);

    /// Number of times `user_id` has seen `experience_id`.
    async fn get_view_count(&self, user_id: &str, experience_id: &str) -> usize;
}

/// Rules store keeping records in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryRulesStore {
    records: RwLock<Vec<ViewRecord>>,
}

impl InMemoryRulesStore {
    #[allow(missing_docs)]
    pub fn new() -> InMemoryRulesStore {
        InMemoryRulesStore::default()
    }

    /// Snapshot of all records, in insertion order.
    pub async fn records(&self) -> Vec<ViewRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RulesStore for InMemoryRulesStore {
    async fn insert(&self, record: ViewRecord) {
        log::trace!(target: "appcues",
                    experience_id:display = record.experience_id,
                    user_id:display = record.user_id;
                    "recording experience view");
        self.records.write().await.push(record);
    }

    async fn get_view_count(&self, user_id: &str, experience_id: &str) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|it| it.user_id == user_id && it.experience_id == experience_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRulesStore, RulesStore, ViewRecord};

    #[tokio::test]
    async fn counts_views_per_user_and_experience() {
        let store = InMemoryRulesStore::new();
        store.insert(ViewRecord::now("exp-1", "alice")).await;
        store.insert(ViewRecord::now("exp-1", "alice")).await;
        store.insert(ViewRecord::now("exp-1", "bob")).await;
        store.insert(ViewRecord::now("exp-2", "alice")).await;

        assert_eq!(store.get_view_count("alice", "exp-1").await, 2);
        assert_eq!(store.get_view_count("bob", "exp-1").await, 1);
        assert_eq!(store.get_view_count("bob", "exp-2").await, 0);
        assert_eq!(store.records().await.len(), 4);
    }
}
