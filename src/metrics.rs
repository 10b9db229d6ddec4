// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for search-sync.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The embedding application is responsible for choosing the exporter
//! (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `search_sync_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `operation`: create_index, delete_index, upsert, partial_update, delete, bulk, search
//! - `mode`: strict, fuzzy (search only)
//! - `status`: success, error, noop

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a sync operation outcome.
pub fn record_sync_operation(operation: &str, status: &str) {
    counter!(
        "search_sync_operations_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a search query by mode and status.
pub fn record_search_query(mode: &str, status: &str) {
    counter!(
        "search_sync_queries_total",
        "mode" => mode.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record search latency for one mode.
pub fn record_search_latency(mode: &str, duration: Duration) {
    histogram!(
        "search_sync_query_seconds",
        "mode" => mode.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record result count of a search.
pub fn record_search_results(count: usize) {
    histogram!("search_sync_query_results").record(count as f64);
}

/// Record bulk batch size.
pub fn record_bulk_size(count: usize) {
    histogram!("search_sync_bulk_size").record(count as f64);
}

/// Record per-item bulk failures.
pub fn record_bulk_failures(count: usize) {
    if count > 0 {
        counter!("search_sync_bulk_failures_total").increment(count as u64);
    }
}
