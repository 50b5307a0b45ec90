// src/domain/sluggable/representation.rs
use crate::domain::document::{Document, is_blank};
use crate::domain::sluggable::config::SlugConfig;
use serde_json::Value;

/// External reference for `document`: the slug when set, otherwise the
/// primary identifier, otherwise an empty string.
pub fn to_param(document: &Document, config: &SlugConfig) -> String {
    match document.get(config.slug_field()) {
        Some(Value::String(slug)) if !slug.trim().is_empty() => slug.clone(),
        Some(value) if !is_blank(value) => value.to_string(),
        _ => document
            .id()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}
