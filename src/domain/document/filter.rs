// src/domain/document/filter.rs
use crate::domain::document::entity::Document;
use crate::domain::document::value_objects::{DocumentId, FieldName};
use crate::domain::errors::{DomainError, DomainResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// Conjunction of field equalities, optionally excluding one document.
///
/// A missing field compares equal to `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: BTreeMap<FieldName, Value>,
    exclude_id: Option<DocumentId>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_eq(mut self, field: FieldName, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<Value>) {
        self.conditions.insert(field, value.into());
    }

    /// Later conditions win on duplicate fields.
    pub fn merge(&mut self, other: Self) {
        self.conditions.extend(other.conditions);
        if other.exclude_id.is_some() {
            self.exclude_id = other.exclude_id;
        }
    }

    pub fn excluding(mut self, id: Option<DocumentId>) -> Self {
        self.exclude_id = id;
        self
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.conditions.iter()
    }

    pub fn excluded_id(&self) -> Option<&DocumentId> {
        self.exclude_id.as_ref()
    }

    pub fn matches(&self, document: &Document) -> bool {
        if let (Some(excluded), Some(id)) = (&self.exclude_id, document.id()) {
            if excluded == id {
                return false;
            }
        }
        self.conditions
            .iter()
            .all(|(field, expected)| document.get(field).unwrap_or(&Value::Null) == expected)
    }
}

/// Result of a primary-identifier style lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Single(Option<Document>),
    Many(Vec<Document>),
}

impl Lookup {
    pub fn into_single(self) -> Option<Document> {
        match self {
            Self::Single(found) => found,
            Self::Many(found) => found.into_iter().next(),
        }
    }

    pub fn required(self) -> DomainResult<Document> {
        match self {
            Self::Single(Some(document)) => Ok(document),
            Self::Single(None) => Err(DomainError::NotFound("document not found".into())),
            Self::Many(_) => Err(DomainError::Validation(
                "expected a single document, found a list lookup".into(),
            )),
        }
    }
}
