// src/bin/slugify_titles.rs
//
// Saves each command-line argument as the title of a new document and prints
// the slug it was given. Uses SQLite when DATABASE_URL is set (for a file,
// e.g. `sqlite://titles.db?mode=rwc`), otherwise an in-memory collection.
use anyhow::{Result, bail};
use mokkan_sluggable::config::SlugSettings;
use mokkan_sluggable::domain::document::{DocumentReadRepository, DocumentWriteRepository};
use mokkan_sluggable::infrastructure::{
    database,
    repositories::{InMemoryDocumentRepository, SqliteDocumentRepository},
};
use mokkan_sluggable::{Document, FieldName, SlugConfig, SlugOptions, SluggableModel};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const COLLECTION: &str = "articles";
const SOURCE_FIELD: &str = "title";

type Repos = (Arc<dyn DocumentReadRepository>, Arc<dyn DocumentWriteRepository>);

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing();

    let titles: Vec<String> = std::env::args().skip(1).collect();
    if titles.is_empty() {
        bail!("usage: slugify-titles <title>...");
    }

    let settings = SlugSettings::from_env()?;
    let (read_repo, write_repo) = open_repos(settings.database_url()).await?;

    let config = SlugConfig::configure(SOURCE_FIELD, settings.options(SlugOptions::default()))?;
    let model = SluggableModel::bind(config, read_repo, write_repo).await?;

    let title_field = FieldName::new(SOURCE_FIELD)?;
    for title in titles {
        let mut document = Document::new().with(&title_field, title.as_str());
        model.save(&mut document).await?;
        let id = document.id().map(ToString::to_string).unwrap_or_default();
        println!("{}\t{id}\t{title}", model.to_param(&document));
    }

    Ok(())
}

async fn open_repos(database_url: Option<&str>) -> Result<Repos> {
    match database_url {
        Some(url) => {
            let pool = database::init_pool(url).await?;
            database::run_migrations(&pool).await?;
            let repo = Arc::new(SqliteDocumentRepository::new(Arc::new(pool), COLLECTION)?);
            tracing::info!(collection = COLLECTION, "using sqlite document store");
            Ok(split(repo))
        }
        None => {
            let repo = Arc::new(InMemoryDocumentRepository::new());
            tracing::info!("DATABASE_URL not set, using in-memory document store");
            Ok(split(repo))
        }
    }
}

fn split<R>(repo: Arc<R>) -> Repos
where
    R: DocumentReadRepository + DocumentWriteRepository + 'static,
{
    let read_repo: Arc<dyn DocumentReadRepository> = repo.clone();
    let write_repo: Arc<dyn DocumentWriteRepository> = repo;
    (read_repo, write_repo)
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
