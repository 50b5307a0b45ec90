// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

// Extended result codes reported by SQLite.
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_NOTNULL: &str = "1299";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    SQLITE_CONSTRAINT_PRIMARYKEY => {
                        return DomainError::Conflict("document id already exists".into());
                    }
                    SQLITE_CONSTRAINT_UNIQUE => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    SQLITE_CONSTRAINT_NOTNULL => {
                        return DomainError::Validation("required column missing".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
