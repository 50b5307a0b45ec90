// src/infrastructure/repositories/sqlite_document.rs
use crate::domain::document::{
    Document, DocumentId, DocumentReadRepository, DocumentWriteRepository, FieldName, Filter,
    Lookup,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::sync::Arc;

/// One collection inside the shared `documents` table. Fields live in a JSON
/// `body` column and are matched with `json_extract`.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    pool: Arc<SqlitePool>,
    collection: String,
}

impl SqliteDocumentRepository {
    pub fn new(pool: Arc<SqlitePool>, collection: impl Into<String>) -> DomainResult<Self> {
        // Collection names end up in index names.
        let collection = FieldName::new(collection)?;
        Ok(Self {
            pool,
            collection: collection.into(),
        })
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    body: String,
}

impl TryFrom<DocumentRow> for Document {
    type Error = DomainError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let fields: Map<String, Value> = serde_json::from_str(&row.body)
            .map_err(|err| DomainError::Persistence(format!("corrupt document body: {err}")))?;
        Ok(Document::persisted(DocumentId::new(row.id)?, fields))
    }
}

fn encode_body(document: &Document) -> DomainResult<String> {
    serde_json::to_string(document.fields())
        .map_err(|err| DomainError::Persistence(format!("unencodable document body: {err}")))
}

fn json_path(field: &FieldName) -> String {
    format!("json_extract(body, '$.{field}')")
}

fn json_type(field: &FieldName) -> String {
    format!("json_type(body, '$.{field}')")
}

/// Name `json_type` reports for `value`. Checked alongside the extracted
/// value so that `true`, `1` and `1.0` stay distinct, as in `Filter::matches`.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        Value::Number(number) if number.is_f64() => "real",
        Value::Number(_) => "integer",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, collection: &'a str, filter: &'a Filter) {
    builder.push(" WHERE collection = ");
    builder.push_bind(collection);

    for (field, value) in filter.conditions() {
        builder.push(" AND ");
        if value.is_null() {
            // Missing and explicit null both match.
            builder.push(json_path(field));
            builder.push(" IS NULL");
            continue;
        }

        builder.push(format!(
            "{} = '{}'",
            json_type(field),
            json_type_name(value)
        ));
        match value {
            Value::Null | Value::Bool(_) => {}
            Value::Number(number) => {
                builder.push(format!(" AND {} = ", json_path(field)));
                match number.as_i64() {
                    Some(int) => builder.push_bind(int),
                    None => builder.push_bind(number.as_f64().unwrap_or(f64::NAN)),
                };
            }
            Value::String(text) => {
                builder.push(format!(" AND {} = ", json_path(field)));
                builder.push_bind(text.as_str());
            }
            Value::Array(_) | Value::Object(_) => {
                builder.push(format!(" AND {} = json(", json_path(field)));
                builder.push_bind(value.to_string());
                builder.push(")");
            }
        }
    }

    if let Some(id) = filter.excluded_id() {
        builder.push(" AND id <> ");
        builder.push_bind(id.as_str());
    }
}

#[async_trait]
impl DocumentWriteRepository for SqliteDocumentRepository {
    async fn ensure_index(&self, field: &FieldName) -> DomainResult<()> {
        // Shared by every collection that indexes the same field.
        let name = format!("documents_{field}_idx");
        let statement = format!(
            "CREATE INDEX IF NOT EXISTS {name} ON documents (collection, {})",
            json_path(field),
        );
        sqlx::query(&statement)
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        tracing::debug!(index = %name, "ensured document index");
        Ok(())
    }

    async fn insert(&self, document: &Document) -> DomainResult<Document> {
        let id = DocumentId::generate();
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(self.collection.as_str())
            .bind(id.as_str())
            .bind(encode_body(document)?)
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(Document::persisted(id, document.fields().clone()))
    }

    async fn update(&self, document: &Document) -> DomainResult<Document> {
        let id = document
            .id()
            .ok_or_else(|| DomainError::Validation("document has no id".into()))?;
        let result = sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(encode_body(document)?)
            .bind(self.collection.as_str())
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("document {id} not found")));
        }
        Ok(Document::persisted(id.clone(), document.fields().clone()))
    }

    async fn remove(&self, id: &DocumentId) -> DomainResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(self.collection.as_str())
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentReadRepository for SqliteDocumentRepository {
    async fn exists(&self, filter: &Filter) -> DomainResult<bool> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT EXISTS(SELECT 1 FROM documents");
        push_filter(&mut builder, &self.collection, filter);
        builder.push(")");

        let found: i64 = builder
            .build_query_scalar()
            .fetch_one(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(found != 0)
    }

    async fn find_one(&self, filter: &Filter) -> DomainResult<Option<Document>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id, body FROM documents");
        push_filter(&mut builder, &self.collection, filter);
        builder.push(" ORDER BY rowid LIMIT 1");

        let row = builder
            .build_query_as::<DocumentRow>()
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Document::try_from).transpose()
    }

    async fn find_by_identifiers(&self, ids: &[String]) -> DomainResult<Lookup> {
        let wanted: Vec<Option<DocumentId>> =
            ids.iter().map(|raw| DocumentId::new(raw.as_str()).ok()).collect();
        let valid: Vec<&DocumentId> = wanted.iter().flatten().collect();

        let mut found: HashMap<DocumentId, Document> = HashMap::new();
        if !valid.is_empty() {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
            builder.push_bind(self.collection.as_str());
            builder.push(" AND id IN (");
            let mut separated = builder.separated(", ");
            for id in &valid {
                separated.push_bind(id.as_str());
            }
            builder.push(")");

            let rows = builder
                .build_query_as::<DocumentRow>()
                .fetch_all(&*self.pool)
                .await
                .map_err(map_sqlx)?;
            for row in rows {
                let document = Document::try_from(row)?;
                if let Some(id) = document.id().cloned() {
                    found.insert(id, document);
                }
            }
        }

        let mut ordered = wanted
            .iter()
            .map(|id| id.as_ref().and_then(|id| found.get(id).cloned()));

        Ok(match ids.len() {
            0 => Lookup::Single(None),
            1 => Lookup::Single(ordered.next().flatten()),
            _ => Lookup::Many(ordered.flatten().collect()),
        })
    }
}
