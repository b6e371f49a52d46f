use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use crate::qualification::LocalQualifications;

/// The on-device qualification bundle together with the time it was fetched.
#[derive(Debug, Clone)]
pub struct CachedBundle {
    #[allow(missing_docs)]
    pub qualifications: Arc<LocalQualifications>,
    #[allow(missing_docs)]
    pub fetched_at: DateTime<Utc>,
}

impl CachedBundle {
    /// Time elapsed since the bundle was fetched.
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}

/// Latest on-device qualification bundle, shared between the qualifier and session refreshes.
///
/// Readers get a cheap snapshot. A refresh swaps the whole bundle, so a qualification pass never
/// observes a mix of two bundles.
#[derive(Debug, Default)]
pub struct BundleStore {
    cached: RwLock<Option<CachedBundle>>,
}

impl BundleStore {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bundle, `None` until the first successful refresh.
    pub fn get(&self) -> Option<CachedBundle> {
        self.read().clone()
    }

    /// Store a freshly fetched bundle.
    pub fn replace(&self, qualifications: LocalQualifications) {
        let cached = CachedBundle {
            qualifications: Arc::new(qualifications),
            fetched_at: Utc::now(),
        };
        let count = cached.qualifications.experiences.len();

        if let Some(previous) = self.write().replace(cached) {
            log::debug!(target: "appcues",
                        count,
                        replaced_age_secs = previous.age().num_seconds();
                        "replaced on-device qualification bundle");
        } else {
            log::debug!(target: "appcues", count; "stored first on-device qualification bundle");
        }
    }

    // A poisoned lock still holds a complete bundle, since writers only swap the slot.
    fn read(&self) -> RwLockReadGuard<'_, Option<CachedBundle>> {
        self.cached
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<CachedBundle>> {
        self.cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::BundleStore;
    use crate::qualification::{LocalQualificationResponse, LocalQualifications};

    fn bundle(ids: &[&str]) -> LocalQualifications {
        let qualifications = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "sortPriority": 0,
                    "rule": {"frequency": "every_time", "conditions": {"and": []}},
                    "experience": {"id": id, "name": id, "steps": []}
                })
            })
            .collect::<Vec<_>>();
        let response: LocalQualificationResponse =
            serde_json::from_value(serde_json::json!({ "qualifications": qualifications }))
                .unwrap();
        response.into()
    }

    #[test]
    fn empty_until_first_refresh() {
        let store = BundleStore::new();
        assert!(store.get().is_none());

        let before = Utc::now();
        store.replace(bundle(&["a"]));

        let cached = store.get().unwrap();
        assert_eq!(cached.qualifications.experiences.len(), 1);
        assert!(cached.fetched_at >= before);
        assert!(cached.age().num_seconds() >= 0);
    }

    #[test]
    fn snapshot_survives_refresh() {
        let store = Arc::new(BundleStore::new());
        store.replace(bundle(&["a"]));
        let snapshot = store.get().unwrap();

        {
            let store = store.clone();
            std::thread::spawn(move || store.replace(bundle(&["b", "c"])))
                .join()
                .unwrap();
        }

        assert_eq!(snapshot.qualifications.experiences[0].experience_id(), Some("a"));
        let current = store.get().unwrap();
        assert_eq!(current.qualifications.experiences.len(), 2);
        assert!(current.fetched_at >= snapshot.fetched_at);
    }
}
