// src/application/model.rs
use std::fmt::Display;
use std::sync::Arc;

use crate::domain::{
    document::{Document, DocumentId, DocumentReadRepository, DocumentWriteRepository, Filter, Lookup},
    errors::DomainResult,
    lifecycle::{HookRegistry, LifecycleBinder, SaveKind},
    sluggable::{IdentifierResolver, SlugConfig, SlugGenerator, to_param},
};

/// Requests the slug index (when configured) and registers slug assignment
/// at the configured trigger.
pub async fn install_slug(
    config: Arc<SlugConfig>,
    read_repo: Arc<dyn DocumentReadRepository>,
    write_repo: &dyn DocumentWriteRepository,
    binder: &dyn LifecycleBinder,
) -> DomainResult<Arc<SlugGenerator>> {
    if config.indexed() {
        write_repo.ensure_index(config.slug_field()).await?;
    }

    let generator = Arc::new(SlugGenerator::new(Arc::clone(&config), read_repo));
    binder.register_hook(config.trigger(), generator.clone());
    tracing::debug!(slug_field = %config.slug_field(), trigger = ?config.trigger(), "slug hook installed");
    Ok(generator)
}

/// A model type with a slug: one collection, its configuration and its save
/// lifecycle.
pub struct SluggableModel {
    config: Arc<SlugConfig>,
    write_repo: Arc<dyn DocumentWriteRepository>,
    hooks: Arc<HookRegistry>,
    resolver: IdentifierResolver,
}

impl SluggableModel {
    pub async fn bind(
        config: SlugConfig,
        read_repo: Arc<dyn DocumentReadRepository>,
        write_repo: Arc<dyn DocumentWriteRepository>,
    ) -> DomainResult<Self> {
        let config = Arc::new(config);
        let hooks = Arc::new(HookRegistry::new());
        install_slug(
            Arc::clone(&config),
            Arc::clone(&read_repo),
            write_repo.as_ref(),
            hooks.as_ref(),
        )
        .await?;

        Ok(Self {
            resolver: IdentifierResolver::new(Arc::clone(&config), read_repo),
            config,
            write_repo,
            hooks,
        })
    }

    pub fn config(&self) -> &SlugConfig {
        &self.config
    }

    /// The save lifecycle; hosts may register further hooks here.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Runs the lifecycle hooks, then inserts or updates. On success the
    /// document carries its id and a fresh persisted snapshot.
    pub async fn save(&self, document: &mut Document) -> DomainResult<()> {
        let kind = if document.is_new() {
            SaveKind::Create
        } else {
            SaveKind::Update
        };
        self.hooks.run(kind, document).await?;

        let stored = match kind {
            SaveKind::Create => self.write_repo.insert(document).await?,
            SaveKind::Update => self.write_repo.update(document).await?,
        };
        tracing::debug!(id = ?stored.id().map(DocumentId::as_str), ?kind, "document saved");
        *document = stored;
        Ok(())
    }

    pub async fn remove(&self, document: &Document) -> DomainResult<()> {
        match document.id() {
            Some(id) => self.write_repo.remove(id).await,
            None => Ok(()),
        }
    }

    /// Identifier lookup that treats a lone non-identifier argument as a slug.
    pub async fn find<A: Display>(&self, args: &[A]) -> DomainResult<Lookup> {
        self.resolver.find(args).await
    }

    pub async fn find_by_slug_in(&self, slug: &str, scope: Filter) -> DomainResult<Lookup> {
        self.resolver.find_by_slug_in(slug, scope).await
    }

    pub fn to_param(&self, document: &Document) -> String {
        to_param(document, &self.config)
    }
}
