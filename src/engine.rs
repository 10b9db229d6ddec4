// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Engine facade.
//!
//! [`SearchSync`] ties the pieces together for callers that don't want to
//! wire them by hand:
//!
//! ```text
//! entity ──► to_document ──► BackendClient ──► search backend
//! terms  ──► SearchExecutor ──► ordered IDs ──► rehydrate ──► ordered records
//! ```
//!
//! The engine owns a [`BackendClient`] handle and the analyzer catalog,
//! and keeps a registry of descriptors created through it. It holds no
//! other state; every operation is an independent request/response call
//! and the engine is safe to share across tasks.
//!
//! # Example
//!
//! ```rust,no_run
//! use search_sync::{SearchSync, SearchSyncConfig};
//! # use search_sync::{DocumentId, Identified, Searchable};
//! # use search_sync::schema::FieldDeclaration;
//! # use serde_json::{json, Map, Value};
//! # struct User { id: i64, name: String }
//! # impl Identified for User {
//! #     fn record_id(&self) -> DocumentId { DocumentId::Int(self.id) }
//! # }
//! # impl Searchable for User {
//! #     fn index_name() -> &'static str { "users" }
//! #     fn field_declarations() -> Vec<FieldDeclaration> {
//! #         vec![FieldDeclaration::text("name").analyzer("autocomplete")]
//! #     }
//! #     fn attributes(&self) -> Map<String, Value> {
//! #         let mut m = Map::new();
//! #         m.insert("name".into(), json!(self.name));
//! #         m
//! #     }
//! # }
//!
//! # async fn example() -> Result<(), search_sync::SyncError> {
//! let engine = SearchSync::new(SearchSyncConfig::default())?;
//!
//! engine.create_index::<User>().await?;
//!
//! let user = User { id: 1, name: "Alice".into() };
//! engine.sync(&user).await?;
//!
//! let hits = engine.smart_search::<User>("alice").await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{BackendClient, BulkOutcome};
use crate::config::SearchSyncConfig;
use crate::document::{to_document, DocumentId, Searchable};
use crate::error::SyncError;
use crate::schema::{build_index_descriptor, AnalyzerCatalog, IndexDescriptor};
use crate::search::{hit_ids, SearchExecutor, SearchHit};
use crate::store::{rehydrate, RecordStore};

/// Facade over client, schema builder, executor, and rehydrator.
pub struct SearchSync {
    catalog: AnalyzerCatalog,
    client: BackendClient,
    executor: SearchExecutor,
    /// Descriptors created through this engine, by index name
    descriptors: RwLock<HashMap<String, IndexDescriptor>>,
}

impl SearchSync {
    /// Build an engine with the builtin analyzer catalog.
    pub fn new(config: SearchSyncConfig) -> Result<Self, SyncError> {
        let catalog = AnalyzerCatalog::builtin(&config);
        Self::with_catalog(config, catalog)
    }

    /// Build an engine with a caller-supplied analyzer catalog.
    pub fn with_catalog(
        config: SearchSyncConfig,
        catalog: AnalyzerCatalog,
    ) -> Result<Self, SyncError> {
        let client = BackendClient::connect(&config)?;
        let executor = SearchExecutor::new(client.clone(), &config);
        Ok(Self {
            catalog,
            client,
            executor,
            descriptors: RwLock::new(HashMap::new()),
        })
    }

    /// The underlying client handle.
    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn catalog(&self) -> &AnalyzerCatalog {
        &self.catalog
    }

    /// Build (and eagerly validate) the descriptor for an entity type
    /// without creating anything.
    pub fn descriptor_for<T: Searchable>(&self) -> Result<IndexDescriptor, SyncError> {
        build_index_descriptor(T::index_name(), &T::field_declarations(), &self.catalog)
    }

    /// Descriptor previously created through this engine, if any.
    pub fn registered_descriptor(&self, name: &str) -> Option<IndexDescriptor> {
        self.descriptors.read().get(name).cloned()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Index lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Create the index for an entity type. Idempotent; returns whether
    /// creation was actually issued.
    pub async fn create_index<T: Searchable>(&self) -> Result<bool, SyncError> {
        let descriptor = self.descriptor_for::<T>()?;
        let created = self.client.create_index(&descriptor).await?;
        self.descriptors
            .write()
            .insert(descriptor.name.clone(), descriptor);
        Ok(created)
    }

    /// Delete the index for an entity type. Idempotent.
    pub async fn drop_index<T: Searchable>(&self) -> Result<(), SyncError> {
        self.client.delete_index(T::index_name()).await?;
        self.descriptors.write().remove(T::index_name());
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Document lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Synchronize one entity: allow-list projection, then full-replace
    /// upsert.
    pub async fn sync<T: Searchable>(&self, entity: &T) -> Result<(), SyncError> {
        let document = to_document(entity);
        self.client
            .upsert(T::index_name(), &entity.record_id(), &document)
            .await
    }

    /// Merge changed fields into an entity's document.
    ///
    /// Fields outside the entity's allow-list are dropped before the call,
    /// so a partial update can never smuggle undeclared fields into the
    /// index. Fails with [`SyncError::NotFound`] when the document was
    /// never created.
    pub async fn sync_partial<T: Searchable>(
        &self,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> Result<(), SyncError> {
        let allowed = T::field_names();
        let filtered: Map<String, Value> = fields
            .into_iter()
            .filter(|(name, _)| allowed.iter().any(|a| a == name))
            .collect();

        if filtered.is_empty() {
            debug!(index = %T::index_name(), id = %id, "Partial update had no allow-listed fields, skipped");
            return Ok(());
        }

        self.client
            .partial_update(T::index_name(), id, &filtered)
            .await
    }

    /// Remove an entity's document. Idempotent.
    pub async fn remove<T: Searchable>(&self, id: &DocumentId) -> Result<(), SyncError> {
        self.client.delete(T::index_name(), id).await
    }

    /// Synchronize many entities in a single round trip. Empty input is a
    /// no-op; failures surface per item.
    pub async fn sync_all<T: Searchable>(
        &self,
        entities: &[T],
    ) -> Result<Vec<BulkOutcome>, SyncError> {
        let items: Vec<(DocumentId, crate::document::Document)> = entities
            .iter()
            .map(|entity| (entity.record_id(), to_document(entity)))
            .collect();
        self.client.bulk_upsert(T::index_name(), &items).await
    }

    // ═══════════════════════════════════════════════════════════════════
    // Search pipeline
    // ═══════════════════════════════════════════════════════════════════

    /// Tiered search over the entity's text fields, default result cap.
    pub async fn smart_search<T: Searchable>(
        &self,
        terms: &str,
    ) -> Result<Vec<SearchHit>, SyncError> {
        let size = self.executor.default_size();
        self.smart_search_with_size::<T>(terms, size).await
    }

    /// Tiered search with an explicit result cap.
    pub async fn smart_search_with_size<T: Searchable>(
        &self,
        terms: &str,
        size: usize,
    ) -> Result<Vec<SearchHit>, SyncError> {
        let fields = Self::search_fields::<T>();
        self.executor
            .smart_search(T::index_name(), terms, &fields, size)
            .await
    }

    /// Full pipeline: tiered search, then order-preserving rehydration
    /// from the system of record.
    pub async fn find<T: Searchable, S: RecordStore>(
        &self,
        store: &S,
        terms: &str,
    ) -> Result<Vec<S::Record>, SyncError> {
        let hits = self.smart_search::<T>(terms).await?;
        rehydrate(store, &hit_ids(&hits)).await
    }

    /// Declared text fields of the entity. Non-text fields never enter a
    /// `multi_match` (the backend rejects text queries against them); an
    /// entity with no text declarations gets an empty field list and the
    /// backend's default field handling.
    fn search_fields<T: Searchable>() -> Vec<String> {
        T::field_declarations()
            .into_iter()
            .filter(|d| d.is_text())
            .map(|d| d.name)
            .collect()
    }
}
