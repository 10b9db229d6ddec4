// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Searchable entities and their document projections.
//!
//! A domain record type opts into synchronization by implementing
//! [`Searchable`]: a fixed capability contract declaring its index name,
//! field declarations, and a full attribute map. [`to_document`] projects
//! the attribute map down to the declared allow-list; the result is the
//! only shape ever pushed to the backend.
//!
//! # Example
//!
//! ```
//! use search_sync::{DocumentId, Identified, Searchable, to_document};
//! use search_sync::schema::FieldDeclaration;
//! use serde_json::{json, Map, Value};
//!
//! struct User { id: i64, name: String, email: String }
//!
//! impl Identified for User {
//!     fn record_id(&self) -> DocumentId {
//!         DocumentId::Int(self.id)
//!     }
//! }
//!
//! impl Searchable for User {
//!     fn index_name() -> &'static str {
//!         "users"
//!     }
//!
//!     fn field_declarations() -> Vec<FieldDeclaration> {
//!         vec![
//!             FieldDeclaration::text("name").analyzer("autocomplete").search_analyzer("autocomplete_search"),
//!             FieldDeclaration::text("email"),
//!         ]
//!     }
//!
//!     fn attributes(&self) -> Map<String, Value> {
//!         let mut m = Map::new();
//!         m.insert("name".into(), json!(self.name));
//!         m.insert("email".into(), json!(self.email));
//!         m.insert("password_hash".into(), json!("never-indexed"));
//!         m
//!     }
//! }
//!
//! let user = User { id: 7, name: "Alice".into(), email: "alice@example.com".into() };
//! let doc = to_document(&user);
//! assert!(doc.fields().contains_key("name"));
//! assert!(!doc.fields().contains_key("password_hash"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::FieldDeclaration;

/// Stable primary key of a searchable record.
///
/// The backing store and the search index agree on this identity. Serializes
/// as a bare JSON number or string, matching how the backend returns `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    Str(String),
}

impl DocumentId {
    /// Parse a backend `_id` string. Backends return all IDs as strings;
    /// numeric-looking IDs are restored to their integer form so they
    /// compare equal to the system of record's keys.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => DocumentId::Int(n),
            Err(_) => DocumentId::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Int(n) => write!(f, "{}", n),
            DocumentId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for DocumentId {
    fn from(n: i64) -> Self {
        DocumentId::Int(n)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId::Str(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId::Str(s)
    }
}

/// A record with a stable identity.
pub trait Identified {
    /// Primary key of this record.
    fn record_id(&self) -> DocumentId;
}

/// Capability contract for types that can be synchronized into the search
/// backend.
///
/// The allow-list of indexable fields is the set of names in
/// [`field_declarations`](Searchable::field_declarations); a field cannot be
/// allow-listed without a type declaration.
pub trait Searchable: Identified {
    /// Name of the backend index this type lives in.
    fn index_name() -> &'static str
    where
        Self: Sized;

    /// Per-field type and analyzer declarations.
    fn field_declarations() -> Vec<FieldDeclaration>
    where
        Self: Sized;

    /// Full attribute map of this record. [`to_document`] filters it down
    /// to the declared fields before anything leaves the process.
    fn attributes(&self) -> Map<String, Value>;

    /// Names of the declared fields, in declaration order.
    fn field_names() -> Vec<String>
    where
        Self: Sized,
    {
        Self::field_declarations()
            .into_iter()
            .map(|d| d.name)
            .collect()
    }
}

/// The allow-listed projection of an entity's attributes.
///
/// Transient: produced on demand, pushed to the backend, never persisted
/// locally. Serializes transparently as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Build a document directly from a field map. Callers normally go
    /// through [`to_document`] instead.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The projected fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Project an entity onto its declared allow-list.
///
/// Deterministic and total: attributes outside the allow-list are dropped,
/// allow-listed fields absent from the entity are omitted (not defaulted).
pub fn to_document<T: Searchable>(entity: &T) -> Document {
    let mut attributes = entity.attributes();
    let mut fields = Map::new();
    for name in T::field_names() {
        if let Some(value) = attributes.remove(&name) {
            fields.insert(name, value);
        }
    }
    Document { fields }
}
