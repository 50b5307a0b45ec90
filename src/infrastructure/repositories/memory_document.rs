// src/infrastructure/repositories/memory_document.rs
use crate::domain::document::{
    Document, DocumentId, DocumentReadRepository, DocumentWriteRepository, FieldName, Filter,
    Lookup,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/// Process-local collection. Documents keep insertion order.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    docs: Mutex<Vec<Document>>,
    indexes: Mutex<BTreeSet<FieldName>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.docs).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indexed_fields(&self) -> Vec<FieldName> {
        lock(&self.indexes).iter().cloned().collect()
    }

    pub fn all(&self) -> Vec<Document> {
        lock(&self.docs).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn require_id(document: &Document) -> DomainResult<&DocumentId> {
    document
        .id()
        .ok_or_else(|| DomainError::Validation("document has no id".into()))
}

#[async_trait]
impl DocumentWriteRepository for InMemoryDocumentRepository {
    async fn ensure_index(&self, field: &FieldName) -> DomainResult<()> {
        lock(&self.indexes).insert(field.clone());
        Ok(())
    }

    async fn insert(&self, document: &Document) -> DomainResult<Document> {
        let id = DocumentId::generate();
        let stored = Document::persisted(id, document.fields().clone());
        lock(&self.docs).push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, document: &Document) -> DomainResult<Document> {
        let id = require_id(document)?;
        let mut docs = lock(&self.docs);
        let slot = docs
            .iter_mut()
            .find(|doc| doc.id() == Some(id))
            .ok_or_else(|| DomainError::NotFound(format!("document {id} not found")))?;
        *slot = Document::persisted(id.clone(), document.fields().clone());
        Ok(slot.clone())
    }

    async fn remove(&self, id: &DocumentId) -> DomainResult<()> {
        lock(&self.docs).retain(|doc| doc.id() != Some(id));
        Ok(())
    }
}

#[async_trait]
impl DocumentReadRepository for InMemoryDocumentRepository {
    async fn exists(&self, filter: &Filter) -> DomainResult<bool> {
        Ok(lock(&self.docs).iter().any(|doc| filter.matches(doc)))
    }

    async fn find_one(&self, filter: &Filter) -> DomainResult<Option<Document>> {
        Ok(lock(&self.docs)
            .iter()
            .find(|doc| filter.matches(doc))
            .cloned())
    }

    async fn find_by_identifiers(&self, ids: &[String]) -> DomainResult<Lookup> {
        let docs = lock(&self.docs);
        let find = |raw: &String| {
            let id = DocumentId::new(raw.as_str()).ok()?;
            docs.iter().find(|doc| doc.id() == Some(&id)).cloned()
        };

        Ok(match ids {
            [] => Lookup::Single(None),
            [only] => Lookup::Single(find(only)),
            many => Lookup::Many(many.iter().filter_map(find).collect()),
        })
    }
}
