// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! System of record and result rehydration.
//!
//! Search yields ordered identifiers; the records themselves live in the
//! system of record. [`rehydrate`] fetches them in a single batched read
//! and re-sorts in memory to the exact search order; the store's native
//! retrieval order carries no relevance information.
//!
//! The search index may run ahead of the store (eventual consistency), so
//! an identifier with no matching record is silently skipped, never an
//! error.

mod memory;

pub use memory::MemoryStore;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::document::{DocumentId, Identified};
use crate::error::SyncError;

/// A system of record: anything that can fetch a batch of records by
/// identifier set.
///
/// The returned batch order is unspecified; ordering is imposed afterwards
/// by [`rehydrate`]. Implementations should issue one backend round trip,
/// not one query per identifier.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Identified + Clone + Send + Sync;

    /// Fetch all records whose identifier appears in `ids`. Identifiers
    /// with no record are simply absent from the result.
    async fn fetch_many(&self, ids: &[DocumentId]) -> Result<Vec<Self::Record>, SyncError>;
}

/// Fetch records for an ordered identifier list and return them in that
/// exact order.
///
/// - One batched read (duplicates collapsed for the fetch).
/// - A duplicated identifier yields the record once per occurrence.
/// - Identifiers missing from the store are skipped without error.
/// - An empty input returns an empty collection without touching the store.
pub async fn rehydrate<S: RecordStore>(
    store: &S,
    ordered_ids: &[DocumentId],
) -> Result<Vec<S::Record>, SyncError> {
    if ordered_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let unique: Vec<DocumentId> = ordered_ids
        .iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect();

    let fetched = store.fetch_many(&unique).await?;
    let by_id: HashMap<DocumentId, S::Record> = fetched
        .into_iter()
        .map(|record| (record.record_id(), record))
        .collect();

    Ok(ordered_ids
        .iter()
        .filter_map(|id| by_id.get(id).cloned())
        .collect())
}
