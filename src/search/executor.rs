// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Two-state search executor: strict attempt, fuzzy fallback.

use std::time::Instant;

use tracing::{debug, info};

use super::query::QueryBody;
use super::SearchHit;
use crate::client::BackendClient;
use crate::config::SearchSyncConfig;
use crate::error::SyncError;
use crate::metrics;

/// Executes tiered searches against the backend.
///
/// Stateless between queries; fuzzy bounds come from config at
/// construction. Safe to share across tasks (the client clones cheaply).
#[derive(Debug, Clone)]
pub struct SearchExecutor {
    client: BackendClient,
    prefix_length: u32,
    max_expansions: u32,
    default_size: usize,
}

impl SearchExecutor {
    pub fn new(client: BackendClient, config: &SearchSyncConfig) -> Self {
        Self {
            client,
            prefix_length: config.fuzzy_prefix_length,
            max_expansions: config.fuzzy_max_expansions,
            default_size: config.search_size,
        }
    }

    /// Default result cap used when callers pass no explicit size.
    pub fn default_size(&self) -> usize {
        self.default_size
    }

    /// Strict attempt only: multi-field AND query, no fallback.
    pub async fn search(
        &self,
        index: &str,
        terms: &str,
        fields: &[String],
        size: usize,
    ) -> Result<Vec<SearchHit>, SyncError> {
        let start = Instant::now();
        let body = QueryBody::strict(terms, fields, size);
        let hits = match self.client.execute_search(index, &body).await {
            Ok(hits) => hits,
            Err(e) => {
                metrics::record_search_query("strict", "error");
                return Err(e);
            }
        };

        metrics::record_search_query("strict", "success");
        metrics::record_search_latency("strict", start.elapsed());
        metrics::record_search_results(hits.len());
        Ok(hits)
    }

    /// Strict attempt, then one fuzzy re-issue when the strict attempt
    /// yields zero hits.
    ///
    /// Returns ordered hits, possibly empty. Empty is a valid terminal
    /// state, not an error.
    pub async fn smart_search(
        &self,
        index: &str,
        terms: &str,
        fields: &[String],
        size: usize,
    ) -> Result<Vec<SearchHit>, SyncError> {
        let hits = self.search(index, terms, fields, size).await?;
        if !hits.is_empty() {
            debug!(index = %index, count = hits.len(), "Strict search matched");
            return Ok(hits);
        }

        info!(index = %index, terms = %terms, "Strict search empty, falling back to fuzzy");

        let start = Instant::now();
        let body = QueryBody::fuzzy(terms, fields, size, self.prefix_length, self.max_expansions);
        let hits = match self.client.execute_search(index, &body).await {
            Ok(hits) => hits,
            Err(e) => {
                metrics::record_search_query("fuzzy", "error");
                return Err(e);
            }
        };

        metrics::record_search_query("fuzzy", "success");
        metrics::record_search_latency("fuzzy", start.elapsed());
        metrics::record_search_results(hits.len());

        debug!(index = %index, count = hits.len(), "Fuzzy fallback finished");
        Ok(hits)
    }
}
