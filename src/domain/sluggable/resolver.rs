// src/domain/sluggable/resolver.rs
use std::fmt::Display;
use std::sync::Arc;

use crate::domain::document::{DocumentId, DocumentReadRepository, Filter, Lookup};
use crate::domain::errors::DomainResult;
use crate::domain::sluggable::config::SlugConfig;

/// How a lookup argument list will be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    Slug(String),
    Identifiers(Vec<String>),
}

impl LookupTarget {
    /// A lone argument that does not look like a primary identifier is a
    /// slug; everything else goes to the native identifier lookup.
    pub fn classify<A: Display>(args: &[A]) -> Self {
        let mut args: Vec<String> = args.iter().map(ToString::to_string).collect();
        if args.len() == 1 && !DocumentId::is_canonical(&args[0]) {
            return Self::Slug(args.remove(0));
        }
        Self::Identifiers(args)
    }
}

/// Slug-aware front for a repository's primary-identifier lookup.
pub struct IdentifierResolver {
    config: Arc<SlugConfig>,
    read_repo: Arc<dyn DocumentReadRepository>,
}

impl IdentifierResolver {
    pub fn new(config: Arc<SlugConfig>, read_repo: Arc<dyn DocumentReadRepository>) -> Self {
        Self { config, read_repo }
    }

    pub async fn find<A: Display>(&self, args: &[A]) -> DomainResult<Lookup> {
        match LookupTarget::classify(args) {
            LookupTarget::Slug(slug) => {
                let filter = Filter::new().field_eq(self.config.slug_field().clone(), slug);
                Ok(Lookup::Single(self.read_repo.find_one(&filter).await?))
            }
            LookupTarget::Identifiers(ids) => self.read_repo.find_by_identifiers(&ids).await,
        }
    }

    /// Slug lookup confined to one scope partition.
    pub async fn find_by_slug_in(&self, slug: &str, scope: Filter) -> DomainResult<Lookup> {
        let mut filter = scope;
        filter.set(self.config.slug_field().clone(), slug);
        Ok(Lookup::Single(self.read_repo.find_one(&filter).await?))
    }
}
