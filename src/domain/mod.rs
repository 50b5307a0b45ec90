// src/domain/mod.rs
pub mod document;
pub mod errors;
pub mod lifecycle;
pub mod sluggable;
