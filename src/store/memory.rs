use async_trait::async_trait;
use dashmap::DashMap;

use super::RecordStore;
use crate::document::{DocumentId, Identified};
use crate::error::SyncError;

/// In-memory system of record.
///
/// Reference implementation of [`RecordStore`], used by tests and small
/// embeddings. Concurrent access is safe; iteration order is arbitrary,
/// which is exactly what the rehydrator must cope with.
pub struct MemoryStore<R> {
    data: DashMap<DocumentId, R>,
}

impl<R: Identified + Clone + Send + Sync> MemoryStore<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Current record count
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert or replace a record, keyed by its own identity.
    pub fn insert(&self, record: R) {
        self.data.insert(record.record_id(), record);
    }

    /// Remove a record by identifier.
    pub fn remove(&self, id: &DocumentId) {
        self.data.remove(id);
    }

    /// Fetch a single record.
    pub fn get(&self, id: &DocumentId) -> Option<R> {
        self.data.get(id).map(|r| r.value().clone())
    }

    /// Clear all records
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl<R: Identified + Clone + Send + Sync> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Identified + Clone + Send + Sync> RecordStore for MemoryStore<R> {
    type Record = R;

    async fn fetch_many(&self, ids: &[DocumentId]) -> Result<Vec<R>, SyncError> {
        let wanted: std::collections::HashSet<&DocumentId> = ids.iter().collect();
        // Map iteration order, deliberately unrelated to the request order
        Ok(self
            .data
            .iter()
            .filter(|entry| wanted.contains(entry.key()))
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Rec {
        id: String,
    }

    impl Identified for Rec {
        fn record_id(&self) -> DocumentId {
            DocumentId::Str(self.id.clone())
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        store.insert(Rec { id: "a".into() });

        assert_eq!(store.len(), 1);
        assert!(store.get(&DocumentId::Str("a".into())).is_some());
        assert!(store.get(&DocumentId::Str("b".into())).is_none());
    }

    #[tokio::test]
    async fn test_insert_replaces_by_identity() {
        let store = MemoryStore::new();
        store.insert(Rec { id: "a".into() });
        store.insert(Rec { id: "a".into() });
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_many_returns_only_requested() {
        let store = MemoryStore::new();
        for id in ["a", "b", "c"] {
            store.insert(Rec { id: id.into() });
        }

        let fetched = store
            .fetch_many(&[DocumentId::Str("a".into()), DocumentId::Str("c".into())])
            .await
            .unwrap();

        let mut got: Vec<String> = fetched.into_iter().map(|r| r.id).collect();
        got.sort();
        assert_eq!(got, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let store = MemoryStore::new();
        store.insert(Rec { id: "a".into() });
        store.insert(Rec { id: "b".into() });

        store.remove(&DocumentId::Str("a".into()));
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let mut handles = vec![];

        for batch in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for i in 0..10 {
                    store.insert(Rec {
                        id: format!("{}-{}", batch, i),
                    });
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len(), 80);
    }
}
