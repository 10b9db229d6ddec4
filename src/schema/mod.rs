// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index schema construction.
//!
//! Combines a process-wide analyzer catalog with a per-entity field
//! declaration into an immutable [`IndexDescriptor`], the creation body
//! sent to the backend.
//!
//! ```text
//! AnalyzerCatalog (tokenizer + filter chains)
//!         +
//! FieldDeclaration list (type, analyzer, search_analyzer)
//!         │
//!         ▼
//! build_index_descriptor()  ──►  IndexDescriptor { settings, mappings }
//! ```
//!
//! Analyzer names are validated eagerly here: a declaration referencing an
//! analyzer the catalog does not define fails with a configuration error at
//! descriptor-build time, never at query time.
//!
//! # Example
//!
//! ```
//! use search_sync::SearchSyncConfig;
//! use search_sync::schema::{build_index_descriptor, AnalyzerCatalog, FieldDeclaration};
//!
//! let catalog = AnalyzerCatalog::builtin(&SearchSyncConfig::default());
//! let fields = vec![
//!     FieldDeclaration::text("name")
//!         .analyzer("autocomplete")
//!         .search_analyzer("autocomplete_search"),
//!     FieldDeclaration::integer("age"),
//! ];
//!
//! let descriptor = build_index_descriptor("users", &fields, &catalog).unwrap();
//! assert_eq!(descriptor.name, "users");
//! ```

mod analyzer;
mod descriptor;

pub use analyzer::{AnalyzerCatalog, AnalyzerSpec, TokenFilter};
pub use descriptor::{build_index_descriptor, FieldDeclaration, FieldType, IndexDescriptor};
