// tests/support/builders.rs
use mokkan_sluggable::Document;
use serde_json::Value;

use super::helpers::{ACCOUNT_ID, AUTHOR, SLUG, TITLE};

/// Article-shaped documents: author, title, account_id and optional slug.
pub struct ArticleBuilder {
    title: Option<String>,
    author: Option<String>,
    account_id: Option<i64>,
    slug: Option<String>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            title: Some("Test Article".into()),
            author: None,
            account_id: None,
            slug: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn untitled(mut self) -> Self {
        self.title = None;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn build(self) -> Document {
        let mut doc = Document::new();
        if let Some(title) = self.title {
            doc.set(&TITLE, title);
        }
        if let Some(author) = self.author {
            doc.set(&AUTHOR, author);
        }
        if let Some(account_id) = self.account_id {
            doc.set(&ACCOUNT_ID, account_id);
        }
        if let Some(slug) = self.slug {
            doc.set(&SLUG, slug);
        }
        doc
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn article(title: &str) -> Document {
    ArticleBuilder::new().title(title).build()
}

pub fn slug_of(document: &Document) -> Option<&str> {
    document.get(&SLUG).and_then(Value::as_str)
}
