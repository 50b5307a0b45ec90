// src/lib.rs
//! Automatically maintained, unique slugs for document models, plus lookups
//! that accept either a primary identifier or a slug.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{SluggableModel, install_slug};
pub use domain::document::{Document, DocumentId, FieldName, Filter, Lookup};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::sluggable::{SlugConfig, SlugOptions};
