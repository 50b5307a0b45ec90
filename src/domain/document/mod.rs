// src/domain/document/mod.rs
pub mod entity;
pub mod filter;
pub mod repository;
pub mod value_objects;

pub use entity::{Document, is_blank};
pub use filter::{Filter, Lookup};
pub use repository::{DocumentReadRepository, DocumentWriteRepository};
pub use value_objects::{DocumentId, FieldName};
