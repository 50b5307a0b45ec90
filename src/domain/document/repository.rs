// src/domain/document/repository.rs
use crate::domain::document::entity::Document;
use crate::domain::document::filter::{Filter, Lookup};
use crate::domain::document::value_objects::{DocumentId, FieldName};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Write side of one document collection.
#[async_trait]
pub trait DocumentWriteRepository: Send + Sync {
    /// Best effort; stores without secondary indexes may treat this as a no-op.
    async fn ensure_index(&self, field: &FieldName) -> DomainResult<()>;
    /// Persists a new document and returns it with its store-assigned id.
    async fn insert(&self, document: &Document) -> DomainResult<Document>;
    async fn update(&self, document: &Document) -> DomainResult<Document>;
    async fn remove(&self, id: &DocumentId) -> DomainResult<()>;
}

/// Read side of one document collection.
#[async_trait]
pub trait DocumentReadRepository: Send + Sync {
    async fn exists(&self, filter: &Filter) -> DomainResult<bool>;
    /// First match in natural (insertion) order.
    async fn find_one(&self, filter: &Filter) -> DomainResult<Option<Document>>;
    /// Native primary-identifier lookup. One argument yields
    /// [`Lookup::Single`], several yield [`Lookup::Many`] in argument order.
    /// Arguments that are not valid identifiers match nothing.
    async fn find_by_identifiers(&self, ids: &[String]) -> DomainResult<Lookup>;
}
