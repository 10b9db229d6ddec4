// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Document admin operations: upsert, partial update, delete, existence,
//! bulk ingestion.

use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::BackendClient;
use crate::document::{Document, DocumentId};
use crate::error::SyncError;
use crate::metrics;

/// Outcome of one item inside a bulk upsert.
///
/// Bulk failures are per-item; a failed item never masquerades as a success
/// and never fails the whole batch.
#[derive(Debug, Clone)]
pub struct BulkOutcome {
    /// Document identifier this outcome refers to
    pub id: DocumentId,
    /// HTTP status the backend reported for this item
    pub status: u16,
    /// Backend error detail for failed items, verbatim
    pub error: Option<String>,
}

impl BulkOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

impl BackendClient {
    /// Store a document with full-replace semantics.
    ///
    /// Create-or-replace: succeeds whether or not the document previously
    /// existed. Fields stored earlier but absent from `document` are gone
    /// afterwards.
    pub async fn upsert(
        &self,
        index: &str,
        id: &DocumentId,
        document: &Document,
    ) -> Result<(), SyncError> {
        let response = self
            .http()
            .put(self.url(&format!("{}/_doc/{}", index, id)))
            .json(document)
            .send()
            .await?;

        if response.status().is_success() {
            metrics::record_sync_operation("upsert", "success");
            debug!(index = %index, id = %id, "Document upserted");
            Ok(())
        } else {
            metrics::record_sync_operation("upsert", "error");
            Err(Self::rejection(response).await)
        }
    }

    /// Merge `fields` into an existing document. Unmentioned fields are
    /// untouched. Fails with [`SyncError::NotFound`] when no document
    /// exists for `id`; partial update cannot create.
    pub async fn partial_update(
        &self,
        index: &str,
        id: &DocumentId,
        fields: &Map<String, Value>,
    ) -> Result<(), SyncError> {
        let response = self
            .http()
            .post(self.url(&format!("{}/_update/{}", index, id)))
            .json(&json!({ "doc": fields }))
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => {
                metrics::record_sync_operation("partial_update", "success");
                debug!(index = %index, id = %id, "Document partially updated");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                metrics::record_sync_operation("partial_update", "error");
                Err(SyncError::NotFound {
                    index: index.to_string(),
                    id: id.to_string(),
                })
            }
            _ => {
                metrics::record_sync_operation("partial_update", "error");
                Err(Self::rejection(response).await)
            }
        }
    }

    /// Delete a document. Idempotent: a missing document or a missing
    /// index is a no-op.
    pub async fn delete(&self, index: &str, id: &DocumentId) -> Result<(), SyncError> {
        let response = self
            .http()
            .delete(self.url(&format!("{}/_doc/{}", index, id)))
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => {
                metrics::record_sync_operation("delete", "success");
                debug!(index = %index, id = %id, "Document deleted");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                metrics::record_sync_operation("delete", "noop");
                debug!(index = %index, id = %id, "Document absent, delete skipped");
                Ok(())
            }
            _ => {
                metrics::record_sync_operation("delete", "error");
                Err(Self::rejection(response).await)
            }
        }
    }

    /// Check whether a document exists. Always safe to call.
    pub async fn document_exists(&self, index: &str, id: &DocumentId) -> Result<bool, SyncError> {
        let response = self
            .http()
            .head(self.url(&format!("{}/_doc/{}", index, id)))
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::rejection(response).await),
        }
    }

    /// Upsert many documents in a single round trip.
    ///
    /// Empty input is a no-op and performs no network call. Returns one
    /// outcome per submitted item, in submission order.
    pub async fn bulk_upsert(
        &self,
        index: &str,
        items: &[(DocumentId, Document)],
    ) -> Result<Vec<BulkOutcome>, SyncError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut body = String::new();
        for (id, document) in items {
            let action = json!({ "index": { "_id": id.to_string() } });
            body.push_str(&serde_json::to_string(&action).map_err(invalid_payload)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(document).map_err(invalid_payload)?);
            body.push('\n');
        }

        metrics::record_bulk_size(items.len());

        let response = self
            .http()
            .post(self.url(&format!("{}/_bulk", index)))
            .header("content-type", "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            metrics::record_sync_operation("bulk", "error");
            return Err(Self::rejection(response).await);
        }

        let parsed: Value = response.json().await?;
        let outcomes = Self::parse_bulk_response(items, &parsed)?;

        let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
        metrics::record_bulk_failures(failed);
        if failed > 0 {
            metrics::record_sync_operation("bulk", "partial");
            warn!(index = %index, total = items.len(), failed, "Bulk upsert had per-item failures");
        } else {
            metrics::record_sync_operation("bulk", "success");
            debug!(index = %index, total = items.len(), "Bulk upsert complete");
        }

        Ok(outcomes)
    }

    /// Map the backend's bulk response items back onto the submitted items.
    /// Matching is positional (the backend reports items in submission
    /// order); outcomes always carry the submitted identifier, so a string
    /// ID never comes back re-parsed into a different form.
    fn parse_bulk_response(
        items: &[(DocumentId, Document)],
        parsed: &Value,
    ) -> Result<Vec<BulkOutcome>, SyncError> {
        let reported = parsed
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| SyncError::BackendRejection {
                status: 200,
                detail: format!("malformed bulk response: {}", parsed),
            })?;

        let mut outcomes = Vec::with_capacity(items.len());
        for (i, (submitted_id, _)) in items.iter().enumerate() {
            let item = reported
                .get(i)
                .and_then(|entry| entry.as_object())
                .and_then(|entry| entry.values().next());

            let outcome = match item {
                Some(detail) => {
                    let id = submitted_id.clone();
                    let status = detail
                        .get("status")
                        .and_then(Value::as_u64)
                        .unwrap_or(200) as u16;
                    let error = detail.get("error").map(Value::to_string);
                    BulkOutcome { id, status, error }
                }
                // The backend dropped an item from its report; surface the
                // gap rather than assuming success.
                None => BulkOutcome {
                    id: submitted_id.clone(),
                    status: 0,
                    error: Some("missing from bulk response".to_string()),
                },
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

fn invalid_payload(e: serde_json::Error) -> SyncError {
    SyncError::Connection(format!("failed to encode bulk payload: {}", e))
}
