//! Configuration for search-sync.
//!
//! # Example
//!
//! ```
//! use search_sync::SearchSyncConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SearchSyncConfig::default();
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 9200);
//!
//! // Full config
//! let config = SearchSyncConfig {
//!     host: "search.internal".into(),
//!     port: 9200,
//!     search_size: 25,
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Configuration for the sync core and search executor.
///
/// All fields have sensible defaults matching a local Elasticsearch-compatible
/// backend on port 9200.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSyncConfig {
    /// Backend host (without scheme)
    #[serde(default = "default_host")]
    pub host: String,

    /// Backend port
    #[serde(default = "default_port")]
    pub port: u16,

    /// URL scheme ("http" or "https")
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Per-request timeout in milliseconds. Every network-facing call is
    /// bounded by this; a timed-out call fails with a connection error.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Default result cap for searches
    #[serde(default = "default_search_size")]
    pub search_size: usize,

    /// Fuzzy fallback: number of leading characters held fixed per term
    #[serde(default = "default_fuzzy_prefix_length")]
    pub fuzzy_prefix_length: u32,

    /// Fuzzy fallback: cap on matching term variants expanded per term
    #[serde(default = "default_fuzzy_max_expansions")]
    pub fuzzy_max_expansions: u32,

    /// Edge n-gram filter minimum gram length (autocomplete analyzer)
    #[serde(default = "default_edge_ngram_min")]
    pub edge_ngram_min_gram: u32,

    /// Edge n-gram filter maximum gram length (autocomplete analyzer)
    #[serde(default = "default_edge_ngram_max")]
    pub edge_ngram_max_gram: u32,
}

fn default_host() -> String { "localhost".into() }
fn default_port() -> u16 { 9200 }
fn default_scheme() -> String { "http".into() }
fn default_request_timeout_ms() -> u64 { 10_000 }
fn default_search_size() -> usize { 10 }
fn default_fuzzy_prefix_length() -> u32 { 2 }
fn default_fuzzy_max_expansions() -> u32 { 20 }
fn default_edge_ngram_min() -> u32 { 2 }
fn default_edge_ngram_max() -> u32 { 20 }

impl SearchSyncConfig {
    /// Base URL of the backend, e.g. `http://localhost:9200`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl Default for SearchSyncConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            request_timeout_ms: default_request_timeout_ms(),
            search_size: default_search_size(),
            fuzzy_prefix_length: default_fuzzy_prefix_length(),
            fuzzy_max_expansions: default_fuzzy_max_expansions(),
            edge_ngram_min_gram: default_edge_ngram_min(),
            edge_ngram_max_gram: default_edge_ngram_max(),
        }
    }
}
