// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Backend client.
//!
//! [`BackendClient`] talks to an Elasticsearch-compatible REST backend:
//! index admin, document admin, bulk ingestion, and query execution. All
//! operations are stateless request/response calls over a shared
//! `reqwest::Client` (connection-pooled, safe for concurrent use, cheap to
//! clone).
//!
//! # Idempotent semantics
//!
//! - `create_index` is a no-op when the index already exists
//! - `delete_index` and `delete` are no-ops when the target is absent
//!
//! Every call is bounded by the configured request timeout and fails with
//! [`SyncError::Connection`] on transport problems; the client never
//! retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use search_sync::{BackendClient, SearchSyncConfig};
//!
//! # async fn example() -> Result<(), search_sync::SyncError> {
//! let client = BackendClient::connect(&SearchSyncConfig::default())?;
//! assert!(!client.index_exists("users").await?);
//! # Ok(())
//! # }
//! ```

mod documents;
mod indices;
mod query;

pub use documents::BulkOutcome;

use std::time::Duration;

use reqwest::Response;

use crate::config::SearchSyncConfig;
use crate::error::SyncError;

/// HTTP client handle for the search backend.
///
/// Constructed explicitly and passed where needed; there is no ambient
/// global client. Clone shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client from config. Does not contact the backend; the first
    /// operation does.
    pub fn connect(config: &SearchSyncConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| SyncError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Turn a non-success response into a rejection error, preserving the
    /// backend body verbatim for diagnostics.
    pub(crate) async fn rejection(response: Response) -> SyncError {
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_default();
        SyncError::BackendRejection { status, detail }
    }
}
