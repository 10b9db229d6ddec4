// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index admin operations.

use reqwest::StatusCode;
use tracing::{debug, info};

use super::BackendClient;
use crate::error::SyncError;
use crate::metrics;
use crate::schema::IndexDescriptor;

impl BackendClient {
    /// Check whether an index exists. Always safe to call.
    pub async fn index_exists(&self, name: &str) -> Result<bool, SyncError> {
        let response = self.http().head(self.url(name)).send().await?;
        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::rejection(response).await),
        }
    }

    /// Create an index from a descriptor.
    ///
    /// Idempotent: returns `Ok(false)` without issuing creation when the
    /// index already exists. Returns `Ok(true)` when the index was created.
    /// Backend rejection (e.g. an invalid mapping) surfaces as
    /// [`SyncError::IndexCreation`] with the backend body preserved.
    pub async fn create_index(&self, descriptor: &IndexDescriptor) -> Result<bool, SyncError> {
        if self.index_exists(&descriptor.name).await? {
            debug!(index = %descriptor.name, "Index already exists, creation skipped");
            metrics::record_sync_operation("create_index", "noop");
            return Ok(false);
        }

        let response = self
            .http()
            .put(self.url(&descriptor.name))
            .json(&descriptor.creation_body())
            .send()
            .await?;

        if response.status().is_success() {
            metrics::record_sync_operation("create_index", "success");
            info!(index = %descriptor.name, "Index created");
            Ok(true)
        } else {
            metrics::record_sync_operation("create_index", "error");
            let detail = response.text().await.unwrap_or_default();
            Err(SyncError::IndexCreation(detail))
        }
    }

    /// Delete an index. Idempotent: a missing index is a no-op.
    pub async fn delete_index(&self, name: &str) -> Result<(), SyncError> {
        let response = self.http().delete(self.url(name)).send().await?;
        match response.status() {
            s if s.is_success() => {
                metrics::record_sync_operation("delete_index", "success");
                info!(index = %name, "Index deleted");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                metrics::record_sync_operation("delete_index", "noop");
                debug!(index = %name, "Index absent, delete skipped");
                Ok(())
            }
            _ => {
                metrics::record_sync_operation("delete_index", "error");
                Err(Self::rejection(response).await)
            }
        }
    }
}
