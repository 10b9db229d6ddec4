// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Tiered search execution.
//!
//! # Architecture
//!
//! ```text
//! smart_search(index, terms, fields)
//!       │
//!       ├─→ Strict: multi-field AND query
//!       │        │
//!       │        └─→ Hits? Return ordered hits
//!       │
//!       └─→ Fuzzy fallback (strict returned zero hits)
//!                │  edit distance 1, first 2 chars fixed,
//!                │  bounded term expansion
//!                └─→ Return ordered hits (possibly empty)
//! ```
//!
//! The executor holds no state between queries. Zero results is a valid
//! terminal state, never an error. Hit order is assigned by the backend
//! (descending relevance) and preserved bit-for-bit; no secondary
//! tie-break determinism is assumed.

mod executor;
mod query;

pub use executor::SearchExecutor;
pub use query::QueryBody;

use crate::document::DocumentId;

/// One ranked hit: a document identifier with its engine-assigned score.
///
/// The score is opaque; only the ordering among hits is meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: DocumentId,
    pub score: Option<f64>,
}

/// Project hits onto their identifiers, preserving order.
pub fn hit_ids(hits: &[SearchHit]) -> Vec<DocumentId> {
    hits.iter().map(|h| h.id.clone()).collect()
}
