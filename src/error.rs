// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Error taxonomy for search-sync.
//!
//! Every fallible operation returns [`SyncError`]. Idempotent no-ops
//! (deleting a missing index or document, creating an index that already
//! exists, a zero-hit search) are success, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Invalid or missing analyzer/field declaration. Detected eagerly at
    /// descriptor-build time, never at query time. Not retryable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Partial update targeted a document that does not exist.
    /// Partial update cannot create.
    #[error("document not found: {index}/{id}")]
    NotFound { index: String, id: String },

    /// Transport-level failure (connect, timeout, transfer). The core does
    /// not retry; a wrapping policy layer may.
    #[error("backend connection error: {0}")]
    Connection(String),

    /// The backend rejected index creation (e.g. invalid mapping).
    /// Backend detail is preserved verbatim for diagnostics.
    #[error("index creation rejected: {0}")]
    IndexCreation(String),

    /// Any other structural rejection from the backend (bad query, bad
    /// request body). Status and body preserved verbatim.
    #[error("backend rejected request (HTTP {status}): {detail}")]
    BackendRejection { status: u16, detail: String },
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Connection(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_preserves_backend_detail() {
        let err = SyncError::BackendRejection {
            status: 400,
            detail: r#"{"error":{"type":"mapper_parsing_exception"}}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 400"));
        assert!(msg.contains("mapper_parsing_exception"));
    }

    #[test]
    fn test_not_found_names_index_and_id() {
        let err = SyncError::NotFound {
            index: "users".into(),
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "document not found: users/42");
    }
}
