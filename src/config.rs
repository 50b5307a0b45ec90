// src/config.rs
use std::env;
use thiserror::Error;

use crate::domain::sluggable::SlugOptions;

#[derive(Clone, Debug)]
pub struct SlugSettings {
    database_url: Option<String>,
    defaults: SlugOptions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{name} must be a boolean, got `{other}`"
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a number, got `{value}`")))
}

impl SlugSettings {
    /// Build settings from environment variables. Every key is optional;
    /// unset keys fall back to the per-model defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SlugSettings::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let slug_field = lookup("SLUG_FIELD").filter(|v| !v.trim().is_empty());

        let max_length = lookup("SLUG_MAX_LENGTH")
            .map(|v| parse_number::<usize>("SLUG_MAX_LENGTH", &v))
            .transpose()?;
        if max_length == Some(0) {
            return Err(ConfigError::Invalid(
                "SLUG_MAX_LENGTH must be positive".into(),
            ));
        }

        let max_attempts = lookup("SLUG_MAX_ATTEMPTS")
            .map(|v| parse_number::<u32>("SLUG_MAX_ATTEMPTS", &v))
            .transpose()?;

        let indexed = lookup("SLUG_INDEXED")
            .map(|v| parse_flag("SLUG_INDEXED", &v))
            .transpose()?;

        let force = lookup("SLUG_FORCE")
            .map(|v| parse_flag("SLUG_FORCE", &v))
            .transpose()?;

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            defaults: SlugOptions {
                slug_field,
                indexed,
                max_length,
                force,
                max_attempts,
                ..SlugOptions::default()
            },
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Like `database_url`, for callers that cannot run without a database.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url().ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    /// Environment defaults with `overrides` applied on top.
    pub fn options(&self, overrides: SlugOptions) -> SlugOptions {
        self.defaults.clone().overlay(overrides)
    }
}
