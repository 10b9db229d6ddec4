// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query execution: POST a search body, parse ordered hits.

use serde_json::Value;
use tracing::debug;

use super::BackendClient;
use crate::document::DocumentId;
use crate::error::SyncError;
use crate::search::SearchHit;

impl BackendClient {
    /// Execute a search request body against an index.
    ///
    /// Returns hits in the order the backend ranked them; that order is
    /// authoritative and preserved as-is. Zero hits is success.
    pub async fn execute_search(
        &self,
        index: &str,
        body: &Value,
    ) -> Result<Vec<SearchHit>, SyncError> {
        let response = self
            .http()
            .post(self.url(&format!("{}/_search", index)))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let parsed: Value = response.json().await?;
        let hits = parse_hits(&parsed);
        debug!(index = %index, count = hits.len(), "Search executed");
        Ok(hits)
    }
}

/// Extract `hits.hits[]` as ordered [`SearchHit`]s. Entries without an
/// `_id` are skipped; scores are opaque and may be null.
fn parse_hits(parsed: &Value) -> Vec<SearchHit> {
    parsed
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let id = entry.get("_id").and_then(Value::as_str)?;
                    Some(SearchHit {
                        id: DocumentId::parse(id),
                        score: entry.get("_score").and_then(Value::as_f64),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
