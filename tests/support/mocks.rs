// tests/support/mocks.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mokkan_sluggable::domain::document::{DocumentReadRepository, DocumentWriteRepository};
use mokkan_sluggable::{
    Document, DocumentId, DomainError, DomainResult, FieldName, Filter, Lookup,
};

/* -------------------------------- Unavailable store -------------------------------- */

/// Every data call fails as if the database were down.
pub struct UnavailableRepo;

fn down<T>() -> DomainResult<T> {
    Err(DomainError::Persistence("connection refused".into()))
}

#[async_trait]
impl DocumentReadRepository for UnavailableRepo {
    async fn exists(&self, _filter: &Filter) -> DomainResult<bool> {
        down()
    }

    async fn find_one(&self, _filter: &Filter) -> DomainResult<Option<Document>> {
        down()
    }

    async fn find_by_identifiers(&self, _ids: &[String]) -> DomainResult<Lookup> {
        down()
    }
}

#[async_trait]
impl DocumentWriteRepository for UnavailableRepo {
    async fn ensure_index(&self, _field: &FieldName) -> DomainResult<()> {
        Ok(())
    }

    async fn insert(&self, _document: &Document) -> DomainResult<Document> {
        down()
    }

    async fn update(&self, _document: &Document) -> DomainResult<Document> {
        down()
    }

    async fn remove(&self, _id: &DocumentId) -> DomainResult<()> {
        down()
    }
}

/* -------------------------------- Call-counting read side -------------------------------- */

/// Wraps a read repository and counts the calls that reach it.
pub struct CountingRead<R> {
    inner: Arc<R>,
    exists_calls: AtomicUsize,
    find_one_calls: AtomicUsize,
    find_by_identifiers_calls: AtomicUsize,
}

impl<R> CountingRead<R> {
    pub fn new(inner: Arc<R>) -> Self {
        Self {
            inner,
            exists_calls: AtomicUsize::new(0),
            find_one_calls: AtomicUsize::new(0),
            find_by_identifiers_calls: AtomicUsize::new(0),
        }
    }

    /// (exists, find_one, find_by_identifiers)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.exists_calls.load(Ordering::SeqCst),
            self.find_one_calls.load(Ordering::SeqCst),
            self.find_by_identifiers_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl<R: DocumentReadRepository> DocumentReadRepository for CountingRead<R> {
    async fn exists(&self, filter: &Filter) -> DomainResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(filter).await
    }

    async fn find_one(&self, filter: &Filter) -> DomainResult<Option<Document>> {
        self.find_one_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_one(filter).await
    }

    async fn find_by_identifiers(&self, ids: &[String]) -> DomainResult<Lookup> {
        self.find_by_identifiers_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_identifiers(ids).await
    }
}
