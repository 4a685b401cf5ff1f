use std::env;

use crate::error::AppError;

const MEMORY_URLS: [&str; 2] = ["sqlite::memory:", "sqlite://:memory:"];

/// Where the backend keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// Any SeaORM-supported URL (Postgres in production, SQLite files locally)
    Url(String),
    /// Private in-memory SQLite, one pinned connection
    InMemory,
}

impl DbProfile {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let url = get("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::config("Required environment variable 'DATABASE_URL' is not set")
            })?;
        Ok(Self::parse(&url))
    }

    pub fn parse(url: &str) -> Self {
        if MEMORY_URLS.contains(&url) {
            DbProfile::InMemory
        } else {
            DbProfile::Url(url.to_string())
        }
    }

    pub fn url(&self) -> &str {
        match self {
            DbProfile::Url(url) => url,
            DbProfile::InMemory => MEMORY_URLS[0],
        }
    }
}
