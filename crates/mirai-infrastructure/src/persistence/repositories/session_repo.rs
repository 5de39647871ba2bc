use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::persistence::SqliteRepositoryBase;
use mirai_domain::session::{Session, SessionRepository};
use mirai_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct SessionRow {
    token: String,
    user_id: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session::restore(
            self.token,
            UserId::from_string(&self.user_id),
            self.created_at,
            self.expires_at,
        )
    }
}

pub struct SqliteSessionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSessionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(session.token())
                    .bind(session.user_id().as_str())
                    .bind(session.created_at())
                    .bind(session.expires_at()),
                "Save session",
            )
            .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = ?1
        "#;

        let row: Option<SessionRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(token), "Find session by token")
            .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("DELETE FROM sessions WHERE token = ?1").bind(token),
                "Delete session",
            )
            .await?;

        Ok(())
    }
}
