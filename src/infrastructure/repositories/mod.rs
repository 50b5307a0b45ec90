// src/infrastructure/repositories/mod.rs
mod error;
mod memory_document;
mod sqlite_document;

pub use error::map_sqlx;
pub use memory_document::InMemoryDocumentRepository;
pub use sqlite_document::SqliteDocumentRepository;
