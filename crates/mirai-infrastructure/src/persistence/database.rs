use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use mirai_domain::shared::DomainError;

/// Pool sizing for the sqlite backend. The defaults suit a single-process
/// server; raise `max_connections` only if read queries start queueing.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self { max_connections: 5 }
    }
}

impl DatabaseSettings {
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Migrated sqlite pool. `open` is the only way in, so holding a `Database`
/// means the schema is current.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database (creating the file and its parent directories as
    /// needed) and bring the schema up to date.
    pub async fn open(db_path: &str, settings: DatabaseSettings) -> Result<Self, DomainError> {
        if let Some(parent) = Path::new(db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::Infrastructure(format!(
                    "Cannot create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // Sessions and entries reference users; let sqlite enforce that.
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                DomainError::Infrastructure(format!("Cannot open database {}: {}", db_path, e))
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
