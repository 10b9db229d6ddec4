//! # Search Sync
//!
//! A document-synchronization and tiered relevance-search core for an
//! Elasticsearch-compatible backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Sync Direction                         │
//! │  domain record ──► Document Mapper (allow-list projection)  │
//! │                ──► BackendClient (idempotent REST calls)    │
//! │                ──► search backend                           │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Query Direction                        │
//! │  terms ──► SearchExecutor (strict AND, fuzzy fallback)      │
//! │        ──► ordered document IDs                             │
//! │        ──► rehydrate (batched fetch + in-memory re-sort)    │
//! │        ──► ordered domain records                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual search machinery (tokenization, scoring, fuzzy matching,
//! index storage) lives in the external backend. This crate is the local
//! abstraction layer: schema construction with eager validation,
//! idempotent synchronization under partial failure, and order-preserving
//! rehydration from the system of record.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use search_sync::{DocumentId, Identified, Searchable, SearchSync, SearchSyncConfig};
//! use search_sync::schema::FieldDeclaration;
//! use serde_json::{json, Map, Value};
//!
//! struct User { id: i64, name: String }
//!
//! impl Identified for User {
//!     fn record_id(&self) -> DocumentId { DocumentId::Int(self.id) }
//! }
//!
//! impl Searchable for User {
//!     fn index_name() -> &'static str { "users" }
//!
//!     fn field_declarations() -> Vec<FieldDeclaration> {
//!         vec![FieldDeclaration::text("name")
//!             .analyzer("autocomplete")
//!             .search_analyzer("autocomplete_search")]
//!     }
//!
//!     fn attributes(&self) -> Map<String, Value> {
//!         let mut m = Map::new();
//!         m.insert("name".into(), json!(self.name));
//!         m
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), search_sync::SyncError> {
//!     let engine = SearchSync::new(SearchSyncConfig::default())?;
//!
//!     engine.create_index::<User>().await?;
//!     engine.sync(&User { id: 1, name: "Alice".into() }).await?;
//!
//!     // Strict multi-field AND query; fuzzy fallback on zero hits
//!     let hits = engine.smart_search::<User>("alice").await?;
//!     for hit in hits {
//!         println!("hit: {}", hit.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: the [`SearchSync`] facade tying everything together
//! - [`client`]: REST client with idempotent index/document admin and bulk ingestion
//! - [`search`]: strict/fuzzy query bodies and the two-state executor
//! - [`schema`]: analyzer catalog and index descriptor construction
//! - [`store`]: system-of-record trait and order-preserving rehydration
//! - [`document`]: the [`Searchable`] capability contract and allow-list projection
//! - [`config`]: [`SearchSyncConfig`]
//! - [`metrics`]: instrumentation helpers (`metrics` crate)

pub mod client;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod schema;
pub mod search;
pub mod store;

pub use client::{BackendClient, BulkOutcome};
pub use config::SearchSyncConfig;
pub use document::{to_document, Document, DocumentId, Identified, Searchable};
pub use engine::SearchSync;
pub use error::SyncError;
pub use schema::{build_index_descriptor, AnalyzerCatalog, FieldDeclaration, IndexDescriptor};
pub use search::{hit_ids, SearchExecutor, SearchHit};
pub use store::{rehydrate, MemoryStore, RecordStore};
