// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field declarations and index descriptors.

use serde_json::{json, Map, Value};

use super::analyzer::AnalyzerCatalog;
use crate::error::SyncError;

/// Backend field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Analyzed full-text field
    Text,
    /// Exact-match, unanalyzed field
    Keyword,
    Integer,
    Long,
    Float,
    Boolean,
    Date,
}

impl FieldType {
    fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of one indexable field: type plus optional index-time and
/// query-time analyzers.
///
/// Built with the typed constructors:
///
/// ```
/// use search_sync::schema::FieldDeclaration;
///
/// let name = FieldDeclaration::text("name")
///     .analyzer("autocomplete")
///     .search_analyzer("autocomplete_search");
/// let age = FieldDeclaration::integer("age");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Field name (must match the entity attribute name)
    pub name: String,
    /// Backend field type
    pub field_type: FieldType,
    /// Index-time analyzer (text fields only)
    pub analyzer: Option<String>,
    /// Query-time analyzer; defaults to the index-time analyzer when unset
    pub search_analyzer: Option<String>,
}

impl FieldDeclaration {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            analyzer: None,
            search_analyzer: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Keyword)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn long(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Long)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Set the index-time analyzer.
    pub fn analyzer(mut self, name: impl Into<String>) -> Self {
        self.analyzer = Some(name.into());
        self
    }

    /// Set the query-time analyzer.
    pub fn search_analyzer(mut self, name: impl Into<String>) -> Self {
        self.search_analyzer = Some(name.into());
        self
    }

    /// Whether this field participates in full-text queries.
    pub fn is_text(&self) -> bool {
        self.field_type == FieldType::Text
    }

    fn mapping(&self) -> Value {
        let mut m = Map::new();
        m.insert("type".into(), json!(self.field_type.as_str()));
        if let Some(ref analyzer) = self.analyzer {
            m.insert("analyzer".into(), json!(analyzer));
        }
        if let Some(ref search_analyzer) = self.search_analyzer {
            m.insert("search_analyzer".into(), json!(search_analyzer));
        }
        Value::Object(m)
    }
}

/// Immutable index configuration: name, analysis settings, field mappings.
///
/// Built once per entity type by [`build_index_descriptor`]. In-place
/// mapping mutation is not supported; recreating an index requires explicit
/// deletion first.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDescriptor {
    /// Index name
    pub name: String,
    /// `settings` section (analysis)
    pub settings: Value,
    /// `mappings` section (field properties)
    pub mappings: Value,
}

impl IndexDescriptor {
    /// Full index-creation request body.
    pub fn creation_body(&self) -> Value {
        json!({
            "settings": self.settings,
            "mappings": self.mappings,
        })
    }
}

/// Assemble an [`IndexDescriptor`] from a field declaration list and the
/// analyzer catalog.
///
/// Fails with [`SyncError::Configuration`] if any declaration references an
/// analyzer the catalog does not define. This is the eager validation point;
/// nothing downstream re-checks analyzer names.
pub fn build_index_descriptor(
    name: &str,
    fields: &[FieldDeclaration],
    catalog: &AnalyzerCatalog,
) -> Result<IndexDescriptor, SyncError> {
    let mut properties = Map::new();

    for field in fields {
        for analyzer in [&field.analyzer, &field.search_analyzer]
            .into_iter()
            .flatten()
        {
            if !catalog.contains(analyzer) {
                return Err(SyncError::Configuration(format!(
                    "field '{}' of index '{}' references unknown analyzer '{}'",
                    field.name, name, analyzer
                )));
            }
        }
        properties.insert(field.name.clone(), field.mapping());
    }

    Ok(IndexDescriptor {
        name: name.to_string(),
        settings: json!({ "analysis": catalog.analysis_settings() }),
        mappings: json!({ "properties": Value::Object(properties) }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchSyncConfig;

    fn catalog() -> AnalyzerCatalog {
        AnalyzerCatalog::builtin(&SearchSyncConfig::default())
    }

    fn declared_fields() -> Vec<FieldDeclaration> {
        vec![
            FieldDeclaration::text("name")
                .analyzer("autocomplete")
                .search_analyzer("autocomplete_search"),
            FieldDeclaration::text("bio").analyzer("full_text"),
            FieldDeclaration::integer("age"),
            FieldDeclaration::keyword("country"),
        ]
    }

    #[test]
    fn test_descriptor_contains_all_fields() {
        let descriptor = build_index_descriptor("users", &declared_fields(), &catalog()).unwrap();
        let properties = descriptor.mappings["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 4);
        assert_eq!(properties["name"]["type"], "text");
        assert_eq!(properties["name"]["analyzer"], "autocomplete");
        assert_eq!(properties["name"]["search_analyzer"], "autocomplete_search");
        assert_eq!(properties["age"]["type"], "integer");
        assert_eq!(properties["country"]["type"], "keyword");
    }

    #[test]
    fn test_non_text_fields_have_no_analyzer_keys() {
        let descriptor = build_index_descriptor("users", &declared_fields(), &catalog()).unwrap();
        let age = descriptor.mappings["properties"]["age"].as_object().unwrap();
        assert!(!age.contains_key("analyzer"));
        assert!(!age.contains_key("search_analyzer"));
    }

    #[test]
    fn test_unknown_analyzer_fails_eagerly() {
        let fields = vec![FieldDeclaration::text("name").analyzer("no_such_analyzer")];
        let err = build_index_descriptor("users", &fields, &catalog()).unwrap_err();
        match err {
            SyncError::Configuration(msg) => {
                assert!(msg.contains("no_such_analyzer"));
                assert!(msg.contains("name"));
            }
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_search_analyzer_fails_eagerly() {
        let fields = vec![FieldDeclaration::text("name")
            .analyzer("full_text")
            .search_analyzer("missing")];
        assert!(matches!(
            build_index_descriptor("users", &fields, &catalog()),
            Err(SyncError::Configuration(_))
        ));
    }

    #[test]
    fn test_creation_body_has_settings_and_mappings() {
        let descriptor = build_index_descriptor("users", &declared_fields(), &catalog()).unwrap();
        let body = descriptor.creation_body();
        assert!(body["settings"]["analysis"]["analyzer"].is_object());
        assert!(body["mappings"]["properties"].is_object());
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Text.to_string(), "text");
        assert_eq!(FieldType::Keyword.to_string(), "keyword");
        assert_eq!(FieldType::Date.to_string(), "date");
    }
}
