// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search request body construction.
//!
//! Two body shapes, both `multi_match` with AND combination across terms:
//!
//! ```json
//! // Strict
//! {"size": 10, "_source": false,
//!  "query": {"multi_match": {"query": "...", "fields": [...], "operator": "and"}}}
//!
//! // Fuzzy fallback
//! {"size": 10, "_source": false,
//!  "query": {"multi_match": {"query": "...", "fields": [...], "operator": "and",
//!            "fuzziness": 1, "prefix_length": 2, "max_expansions": 20}}}
//! ```
//!
//! `_source` is disabled because only ranked identifiers leave the
//! executor; rehydration fetches full records from the system of record.

use serde_json::{json, Value};

/// Builder for search request bodies.
pub struct QueryBody;

impl QueryBody {
    /// Strict multi-field query: every query term must match (AND), across
    /// the given field set, capped at `size` hits.
    pub fn strict(terms: &str, fields: &[String], size: usize) -> Value {
        json!({
            "size": size,
            "_source": false,
            "query": {
                "multi_match": {
                    "query": terms,
                    "fields": fields,
                    "operator": "and",
                }
            }
        })
    }

    /// Fuzzy re-issue of the strict query: maximum edit distance 1, the
    /// first `prefix_length` characters of each term held fixed, and at
    /// most `max_expansions` term variants expanded per term.
    pub fn fuzzy(
        terms: &str,
        fields: &[String],
        size: usize,
        prefix_length: u32,
        max_expansions: u32,
    ) -> Value {
        json!({
            "size": size,
            "_source": false,
            "query": {
                "multi_match": {
                    "query": terms,
                    "fields": fields,
                    "operator": "and",
                    "fuzziness": 1,
                    "prefix_length": prefix_length,
                    "max_expansions": max_expansions,
                }
            }
        })
    }
}
