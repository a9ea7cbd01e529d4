//! SQLite connection settings

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Connection settings resolved once at startup and shared by every operation
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub path: PathBuf,
    pub create_if_missing: bool,
    pub foreign_keys: bool,
}

impl SqliteConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
            foreign_keys: true,
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.database_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
            .foreign_keys(self.foreign_keys)
    }

    /// Open a fresh connection. The caller owns it for exactly one operation.
    pub async fn connect(&self) -> Result<SqliteConnection, DomainError> {
        self.connect_options().connect().await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to open database '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Create the parent directory of the database file if it does not exist yet
    pub fn ensure_parent_dir(&self) -> Result<(), DomainError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })
            }
            _ => Ok(()),
        }
    }
}
