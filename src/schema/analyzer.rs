// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Analyzer catalog.
//!
//! Named tokenizer + filter-chain pipelines, rendered into the backend's
//! `settings.analysis` section at index creation. The builtin catalog
//! covers the common cases:
//!
//! - `autocomplete`: edge n-grams over lowercased tokens, for
//!   search-as-you-type indexing
//! - `autocomplete_search`: the query-side counterpart (no n-gramming,
//!   so a query term matches the grams without being gram-expanded itself)
//! - `full_text`: plain lowercased tokens for long text

use std::collections::HashMap;

use serde_json::{json, Map, Value};

/// A single token filter in an analyzer's chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenFilter {
    /// Backend-builtin lowercase filter
    Lowercase,
    /// Backend-builtin ASCII folding filter
    AsciiFolding,
    /// Custom edge n-gram filter with configurable gram bounds
    EdgeNgram { min_gram: u32, max_gram: u32 },
}

impl TokenFilter {
    /// Name used to reference this filter from an analyzer definition.
    pub fn filter_name(&self) -> &'static str {
        match self {
            TokenFilter::Lowercase => "lowercase",
            TokenFilter::AsciiFolding => "asciifolding",
            TokenFilter::EdgeNgram { .. } => "edge_ngram_filter",
        }
    }

    /// Settings definition for custom filters. Builtins need none.
    pub fn definition(&self) -> Option<Value> {
        match self {
            TokenFilter::Lowercase | TokenFilter::AsciiFolding => None,
            TokenFilter::EdgeNgram { min_gram, max_gram } => Some(json!({
                "type": "edge_ngram",
                "min_gram": min_gram,
                "max_gram": max_gram,
            })),
        }
    }
}

/// A named analyzer: one tokenizer plus an ordered filter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerSpec {
    /// Tokenizer name (e.g. "standard")
    pub tokenizer: String,
    /// Filter chain, applied in order
    pub filters: Vec<TokenFilter>,
}

impl AnalyzerSpec {
    pub fn new(tokenizer: impl Into<String>, filters: Vec<TokenFilter>) -> Self {
        Self {
            tokenizer: tokenizer.into(),
            filters,
        }
    }
}

/// Process-wide catalog of named analyzers.
///
/// Immutable in normal use after construction; built once from config and
/// shared by every descriptor build.
#[derive(Debug, Clone)]
pub struct AnalyzerCatalog {
    analyzers: HashMap<String, AnalyzerSpec>,
}

impl AnalyzerCatalog {
    /// Empty catalog. Prefer [`builtin`](Self::builtin).
    pub fn new() -> Self {
        Self {
            analyzers: HashMap::new(),
        }
    }

    /// The builtin catalog, with edge n-gram bounds taken from config.
    pub fn builtin(config: &crate::config::SearchSyncConfig) -> Self {
        let mut catalog = Self::new();
        catalog.register(
            "autocomplete",
            AnalyzerSpec::new(
                "standard",
                vec![
                    TokenFilter::Lowercase,
                    TokenFilter::AsciiFolding,
                    TokenFilter::EdgeNgram {
                        min_gram: config.edge_ngram_min_gram,
                        max_gram: config.edge_ngram_max_gram,
                    },
                ],
            ),
        );
        catalog.register(
            "autocomplete_search",
            AnalyzerSpec::new(
                "standard",
                vec![TokenFilter::Lowercase, TokenFilter::AsciiFolding],
            ),
        );
        catalog.register(
            "full_text",
            AnalyzerSpec::new(
                "standard",
                vec![TokenFilter::Lowercase, TokenFilter::AsciiFolding],
            ),
        );
        catalog
    }

    /// Register (or replace) an analyzer.
    pub fn register(&mut self, name: impl Into<String>, spec: AnalyzerSpec) {
        self.analyzers.insert(name.into(), spec);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.analyzers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&AnalyzerSpec> {
        self.analyzers.get(name)
    }

    /// Render the catalog into a `settings.analysis` section:
    ///
    /// ```json
    /// {
    ///   "analyzer": { "autocomplete": { "type": "custom", "tokenizer": "standard", "filter": [...] } },
    ///   "filter":   { "edge_ngram_filter": { "type": "edge_ngram", "min_gram": 2, "max_gram": 20 } }
    /// }
    /// ```
    pub fn analysis_settings(&self) -> Value {
        let mut analyzers = Map::new();
        let mut filters = Map::new();

        for (name, spec) in &self.analyzers {
            let chain: Vec<&str> = spec.filters.iter().map(TokenFilter::filter_name).collect();
            analyzers.insert(
                name.clone(),
                json!({
                    "type": "custom",
                    "tokenizer": spec.tokenizer,
                    "filter": chain,
                }),
            );
            for filter in &spec.filters {
                if let Some(definition) = filter.definition() {
                    filters.insert(filter.filter_name().to_string(), definition);
                }
            }
        }

        let mut analysis = Map::new();
        analysis.insert("analyzer".into(), Value::Object(analyzers));
        if !filters.is_empty() {
            analysis.insert("filter".into(), Value::Object(filters));
        }
        Value::Object(analysis)
    }
}

impl Default for AnalyzerCatalog {
    fn default() -> Self {
        Self::new()
    }
}
