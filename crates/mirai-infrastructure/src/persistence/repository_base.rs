use std::sync::Arc;

use mirai_domain::shared::DomainError;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, SqlitePool};

/// Shared plumbing for the sqlite repositories: executes queries against the
/// pooled connection and maps driver errors to `DomainError::Repository`
/// with an operation label.
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        query
            .execute(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        query
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }
}
