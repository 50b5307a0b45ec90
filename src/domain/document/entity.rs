// src/domain/document/entity.rs
use crate::domain::document::value_objects::{DocumentId, FieldName};
use serde_json::{Map, Value};

/// A schemaless record: a primary identifier once persisted, its fields, and
/// a snapshot of the fields as last persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    id: Option<DocumentId>,
    fields: Map<String, Value>,
    persisted: Option<Map<String, Value>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a document as loaded from a store.
    pub fn persisted(id: DocumentId, fields: Map<String, Value>) -> Self {
        Self {
            id: Some(id),
            persisted: Some(fields.clone()),
            fields,
        }
    }

    pub fn with(mut self, field: &FieldName, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.persisted.is_none()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &FieldName) -> Option<&Value> {
        self.fields.get(field.as_str())
    }

    /// String value of `field`, if it holds a string.
    pub fn get_str(&self, field: &FieldName) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn set(&mut self, field: &FieldName, value: impl Into<Value>) {
        self.fields.insert(field.as_str().to_owned(), value.into());
    }

    pub fn is_blank(&self, field: &FieldName) -> bool {
        self.get(field).is_none_or(is_blank)
    }

    /// Whether `field` differs from the last persisted state. For a new
    /// document any non-null value counts as a change.
    pub fn changed(&self, field: &FieldName) -> bool {
        let current = self.get(field).unwrap_or(&Value::Null);
        let previous = self
            .persisted
            .as_ref()
            .and_then(|snapshot| snapshot.get(field.as_str()))
            .unwrap_or(&Value::Null);
        current != previous
    }

    /// The document as it was last persisted; a new document has no fields.
    pub fn persisted_view(&self) -> Self {
        Self {
            id: self.id.clone(),
            fields: self.persisted.clone().unwrap_or_default(),
            persisted: self.persisted.clone(),
        }
    }

    /// Record that the current fields were written under `id`.
    pub fn mark_persisted(&mut self, id: DocumentId) {
        self.id = Some(id);
        self.persisted = Some(self.fields.clone());
    }
}

/// Missing-like values: null, whitespace-only strings, empty arrays and objects.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
