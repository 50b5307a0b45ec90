// src/domain/sluggable/services/mod.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::document::{Document, DocumentReadRepository, Filter};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::lifecycle::LifecycleHook;
use crate::domain::sluggable::config::SlugConfig;

/// Domain service responsible for writing a unique slug onto a document.
///
/// The existence check and the eventual write are not atomic; the store's
/// index is what finally rejects a duplicate produced by concurrent saves.
pub struct SlugGenerator {
    config: Arc<SlugConfig>,
    read_repo: Arc<dyn DocumentReadRepository>,
}

impl SlugGenerator {
    pub fn new(config: Arc<SlugConfig>, read_repo: Arc<dyn DocumentReadRepository>) -> Self {
        Self { config, read_repo }
    }

    /// Writes a unique slug when the slug is blank, or when `force` is set and
    /// the source changed. Leaves the document untouched when the source is
    /// blank or normalizes to an empty string; an empty base is never suffixed
    /// into `-1`, `-2`, ... slugs.
    pub async fn assign(&self, document: &mut Document) -> DomainResult<()> {
        let config = self.config.as_ref();
        let slug_field = config.slug_field();

        let needed = document.is_blank(slug_field)
            || (config.force() && config.source_changed(document));
        if !needed {
            return Ok(());
        }

        let Some(source) = config
            .source_value(document)
            .filter(|value| !value.trim().is_empty())
        else {
            tracing::trace!(field = %slug_field, "blank slug source, skipping");
            return Ok(());
        };

        let base = self.candidate(&source);
        if base.is_empty() {
            tracing::debug!(field = %slug_field, %source, "source normalizes to nothing, skipping");
            return Ok(());
        }
        let slug = self.resolve_unique(document, base).await?;
        document.set(slug_field, slug);
        Ok(())
    }

    /// Normalized source cut to `max_length` characters.
    pub fn candidate(&self, source: &str) -> String {
        self.config
            .normalizer()
            .normalize(source)
            .chars()
            .take(self.config.max_length())
            .collect()
    }

    async fn resolve_unique(&self, document: &Document, base: String) -> DomainResult<String> {
        let slug_field = self.config.slug_field().clone();
        let mut filter = Filter::new().excluding(document.id().cloned());
        filter.merge(self.config.scope_filter(document));

        let mut candidate = base.clone();
        let mut counter = 0u32;

        loop {
            filter.set(slug_field.clone(), candidate.as_str());
            if !self.read_repo.exists(&filter).await? {
                if counter > 0 {
                    tracing::debug!(%base, slug = %candidate, attempts = counter, "resolved slug collision");
                }
                return Ok(candidate);
            }

            if self.config.max_attempts().is_some_and(|max| counter >= max) {
                return Err(DomainError::SlugSpaceExhausted {
                    base,
                    attempts: counter,
                });
            }

            counter += 1;
            candidate = format!("{base}-{counter}");
        }
    }
}

#[async_trait]
impl LifecycleHook for SlugGenerator {
    async fn call(&self, document: &mut Document) -> DomainResult<()> {
        self.assign(document).await
    }
}
