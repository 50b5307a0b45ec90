// src/domain/sluggable/config.rs
use crate::application::ports::NormalizerPort;
use crate::application::ports::util::Normalizer;
use crate::domain::document::{Document, FieldName, Filter};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::lifecycle::TriggerPoint;
use crate::infrastructure::util::ParameterizeNormalizer;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_SOURCE_FIELD: &str = "title";
pub const DEFAULT_SLUG_FIELD: &str = "slug";
pub const DEFAULT_MAX_LENGTH: usize = 256;

pub type ComputedSource = Arc<dyn Fn(&Document) -> Option<String> + Send + Sync>;
pub type ScopeFn = Arc<dyn Fn(&Document) -> Filter + Send + Sync>;

/// Where the text to slug comes from.
#[derive(Clone)]
pub enum SlugSource {
    Field(FieldName),
    /// Derived from several fields; `changed` compares against the persisted view.
    Computed { name: String, accessor: ComputedSource },
}

/// Partition of the uniqueness space.
#[derive(Clone, Default)]
pub enum Scope {
    #[default]
    Unscoped,
    Field(FieldName),
    Custom(ScopeFn),
}

/// Overrides applied on top of the defaults. Every key is optional and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SlugOptions {
    pub slug_field: Option<String>,
    pub indexed: Option<bool>,
    pub scope: Option<String>,
    pub max_length: Option<usize>,
    pub trigger: Option<TriggerPoint>,
    pub force: Option<bool>,
    pub max_attempts: Option<u32>,
}

impl SlugOptions {
    /// `overrides` wins wherever it sets a key.
    #[must_use]
    pub fn overlay(self, overrides: Self) -> Self {
        Self {
            slug_field: overrides.slug_field.or(self.slug_field),
            indexed: overrides.indexed.or(self.indexed),
            scope: overrides.scope.or(self.scope),
            max_length: overrides.max_length.or(self.max_length),
            trigger: overrides.trigger.or(self.trigger),
            force: overrides.force.or(self.force),
            max_attempts: overrides.max_attempts.or(self.max_attempts),
        }
    }
}

/// Slug settings for one model type. Immutable once built; share it behind an `Arc`.
#[derive(Clone)]
pub struct SlugConfig {
    source: SlugSource,
    slug_field: FieldName,
    indexed: bool,
    normalizer: Arc<NormalizerPort>,
    scope: Scope,
    max_length: usize,
    trigger: TriggerPoint,
    force: bool,
    max_attempts: Option<u32>,
}

impl SlugConfig {
    pub fn configure(source_field: &str, options: SlugOptions) -> DomainResult<Self> {
        Self::builder(source_field).options(options).build()
    }

    pub fn builder(source_field: impl Into<String>) -> SlugConfigBuilder {
        SlugConfigBuilder {
            source_field: source_field.into(),
            ..SlugConfigBuilder::default()
        }
    }

    pub fn source(&self) -> &SlugSource {
        &self.source
    }

    pub fn slug_field(&self) -> &FieldName {
        &self.slug_field
    }

    pub fn indexed(&self) -> bool {
        self.indexed
    }

    pub fn normalizer(&self) -> &NormalizerPort {
        self.normalizer.as_ref()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn trigger(&self) -> TriggerPoint {
        self.trigger
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Text to derive the slug from. Strings are used as is, numbers and
    /// booleans are stringified, other shapes yield nothing.
    pub fn source_value(&self, document: &Document) -> Option<String> {
        match &self.source {
            SlugSource::Field(field) => match document.get(field)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            },
            SlugSource::Computed { accessor, .. } => accessor(document),
        }
    }

    pub fn source_changed(&self, document: &Document) -> bool {
        match &self.source {
            SlugSource::Field(field) => document.changed(field),
            SlugSource::Computed { accessor, .. } => {
                accessor(document) != accessor(&document.persisted_view())
            }
        }
    }

    /// Conditions confining the uniqueness check to `document`'s partition.
    pub fn scope_filter(&self, document: &Document) -> Filter {
        match &self.scope {
            Scope::Unscoped => Filter::new(),
            Scope::Field(field) => Filter::new().field_eq(
                field.clone(),
                document.get(field).cloned().unwrap_or(Value::Null),
            ),
            Scope::Custom(scope) => scope(document),
        }
    }
}

impl fmt::Debug for SlugConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            SlugSource::Field(field) => field.as_str(),
            SlugSource::Computed { name, .. } => name.as_str(),
        };
        let scope = match &self.scope {
            Scope::Unscoped => "none",
            Scope::Field(field) => field.as_str(),
            Scope::Custom(_) => "<custom>",
        };
        f.debug_struct("SlugConfig")
            .field("source", &source)
            .field("slug_field", &self.slug_field)
            .field("indexed", &self.indexed)
            .field("scope", &scope)
            .field("max_length", &self.max_length)
            .field("trigger", &self.trigger)
            .field("force", &self.force)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct SlugConfigBuilder {
    source_field: String,
    computed_source: Option<ComputedSource>,
    normalizer: Option<Arc<NormalizerPort>>,
    custom_scope: Option<ScopeFn>,
    options: SlugOptions,
}

impl SlugConfigBuilder {
    pub fn options(mut self, options: SlugOptions) -> Self {
        self.options = self.options.overlay(options);
        self
    }

    pub fn slug_field(mut self, field: impl Into<String>) -> Self {
        self.options.slug_field = Some(field.into());
        self
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.options.indexed = Some(indexed);
        self
    }

    pub fn normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    /// Derive the slug from `accessor` instead of a stored field. The builder's
    /// source name is kept as the label.
    pub fn computed_source<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&Document) -> Option<String> + Send + Sync + 'static,
    {
        self.computed_source = Some(Arc::new(accessor));
        self
    }

    pub fn scope_field(mut self, field: impl Into<String>) -> Self {
        self.options.scope = Some(field.into());
        self.custom_scope = None;
        self
    }

    pub fn scope_with<F>(mut self, scope: F) -> Self
    where
        F: Fn(&Document) -> Filter + Send + Sync + 'static,
    {
        self.custom_scope = Some(Arc::new(scope));
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.options.max_length = Some(max_length);
        self
    }

    pub fn trigger(mut self, trigger: TriggerPoint) -> Self {
        self.options.trigger = Some(trigger);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.options.force = Some(force);
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.options.max_attempts = Some(max_attempts);
        self
    }

    pub fn build(self) -> DomainResult<SlugConfig> {
        let source = match self.computed_source {
            Some(accessor) => SlugSource::Computed {
                name: self.source_field,
                accessor,
            },
            None => SlugSource::Field(FieldName::new(self.source_field)?),
        };

        let options = self.options;
        let slug_field = FieldName::new(
            options
                .slug_field
                .unwrap_or_else(|| DEFAULT_SLUG_FIELD.to_owned()),
        )?;

        let scope = match (self.custom_scope, options.scope) {
            (Some(scope), _) => Scope::Custom(scope),
            (None, Some(field)) => Scope::Field(FieldName::new(field)?),
            (None, None) => Scope::Unscoped,
        };

        let max_length = options.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        if max_length == 0 {
            return Err(DomainError::Validation(
                "max_length must be positive".into(),
            ));
        }

        Ok(SlugConfig {
            source,
            slug_field,
            indexed: options.indexed.unwrap_or(true),
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Arc::new(ParameterizeNormalizer)),
            scope,
            max_length,
            trigger: options.trigger.unwrap_or_default(),
            force: options.force.unwrap_or(false),
            max_attempts: options.max_attempts,
        })
    }
}
