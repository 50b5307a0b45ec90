// tests/support/helpers.rs
use std::sync::Arc;

use mokkan_sluggable::infrastructure::database;
use mokkan_sluggable::infrastructure::repositories::{
    InMemoryDocumentRepository, SqliteDocumentRepository,
};
use mokkan_sluggable::{FieldName, SlugConfig, SluggableModel};
use once_cell::sync::Lazy;
use sqlx::SqlitePool;

pub static TITLE: Lazy<FieldName> = Lazy::new(|| field("title"));
pub static AUTHOR: Lazy<FieldName> = Lazy::new(|| field("author"));
pub static ACCOUNT_ID: Lazy<FieldName> = Lazy::new(|| field("account_id"));
pub static SLUG: Lazy<FieldName> = Lazy::new(|| field("slug"));

pub fn field(name: &str) -> FieldName {
    FieldName::new(name).expect("valid field name in tests")
}

pub fn default_config() -> SlugConfig {
    SlugConfig::builder("title").build().expect("default config")
}

/// A model bound to a fresh in-memory collection; the repository is returned
/// for direct inspection.
pub async fn memory_model(config: SlugConfig) -> (SluggableModel, Arc<InMemoryDocumentRepository>) {
    let repo = Arc::new(InMemoryDocumentRepository::new());
    let model = SluggableModel::bind(config, repo.clone(), repo.clone())
        .await
        .expect("bind model");
    (model, repo)
}

pub async fn sqlite_pool() -> Arc<SqlitePool> {
    let pool = database::init_pool("sqlite::memory:")
        .await
        .expect("open sqlite pool");
    database::run_migrations(&pool).await.expect("migrate");
    Arc::new(pool)
}

pub async fn sqlite_model(
    pool: Arc<SqlitePool>,
    collection: &str,
    config: SlugConfig,
) -> (SluggableModel, Arc<SqliteDocumentRepository>) {
    let repo = Arc::new(SqliteDocumentRepository::new(pool, collection).expect("collection name"));
    let model = SluggableModel::bind(config, repo.clone(), repo.clone())
        .await
        .expect("bind model");
    (model, repo)
}
