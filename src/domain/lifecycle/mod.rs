// src/domain/lifecycle/mod.rs
//! Save-lifecycle hooks.
//!
//! A save walks [`TriggerPoint::SAVE_ORDER`] and runs every hook registered at
//! a point that fires for the kind of save in progress.

use crate::domain::document::Document;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerPoint {
    BeforeValidation,
    #[default]
    BeforeValidationOnCreate,
    BeforeValidationOnUpdate,
    BeforeSave,
    BeforeCreate,
    BeforeUpdate,
}

impl TriggerPoint {
    pub const SAVE_ORDER: [Self; 6] = [
        Self::BeforeValidation,
        Self::BeforeValidationOnCreate,
        Self::BeforeValidationOnUpdate,
        Self::BeforeSave,
        Self::BeforeCreate,
        Self::BeforeUpdate,
    ];

    pub fn fires_on(self, kind: SaveKind) -> bool {
        match self {
            Self::BeforeValidation | Self::BeforeSave => true,
            Self::BeforeValidationOnCreate | Self::BeforeCreate => kind == SaveKind::Create,
            Self::BeforeValidationOnUpdate | Self::BeforeUpdate => kind == SaveKind::Update,
        }
    }
}

#[async_trait]
pub trait LifecycleHook: Send + Sync {
    async fn call(&self, document: &mut Document) -> DomainResult<()>;
}

pub trait LifecycleBinder: Send + Sync {
    fn register_hook(&self, trigger: TriggerPoint, hook: Arc<dyn LifecycleHook>);
}

/// In-process [`LifecycleBinder`] that also drives the hooks during a save.
#[derive(Default)]
pub struct HookRegistry {
    hooks: RwLock<Vec<(TriggerPoint, Arc<dyn LifecycleHook>)>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hooks.read().map_or(0, |hooks| hooks.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs hooks in save order, then registration order within a point.
    /// The first failing hook aborts the save.
    pub async fn run(&self, kind: SaveKind, document: &mut Document) -> DomainResult<()> {
        let hooks = self.snapshot();
        for point in TriggerPoint::SAVE_ORDER {
            if !point.fires_on(kind) {
                continue;
            }
            for (_, hook) in hooks.iter().filter(|(registered, _)| *registered == point) {
                hook.call(document).await?;
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<(TriggerPoint, Arc<dyn LifecycleHook>)> {
        match self.hooks.read() {
            Ok(hooks) => hooks.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LifecycleBinder for HookRegistry {
    fn register_hook(&self, trigger: TriggerPoint, hook: Arc<dyn LifecycleHook>) {
        let mut hooks = match self.hooks.write() {
            Ok(hooks) => hooks,
            Err(poisoned) => poisoned.into_inner(),
        };
        hooks.push((trigger, hook));
    }
}
