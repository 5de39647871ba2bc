use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::persistence::SqliteRepositoryBase;
use mirai_domain::shared::{DomainError, UserId};
use mirai_domain::user::{User, UserProfile, UserRepository};

#[derive(FromRow)]
struct UserRow {
    id: String,
    user_name: String,
    passphrase_hash: String,
    favorite_colors: String,
    favorite_season: Option<String>,
    occupation: Option<String>,
    hobbies: Option<String>,
    cover_image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, DomainError> {
        let favorite_colors: Vec<String> =
            serde_json::from_str(&self.favorite_colors).map_err(|e| {
                DomainError::Serialization(format!(
                    "Invalid favorite_colors for user {}: {}",
                    self.id, e
                ))
            })?;

        Ok(User::restore(
            UserId::from_string(&self.id),
            self.user_name,
            self.passphrase_hash,
            UserProfile {
                favorite_colors,
                favorite_season: self.favorite_season,
                occupation: self.occupation,
                hobbies: self.hobbies,
            },
            self.cover_image_url,
            self.created_at,
        ))
    }
}

pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT
        id,
        user_name,
        passphrase_hash,
        favorite_colors,
        favorite_season,
        occupation,
        hobbies,
        cover_image_url,
        created_at
    FROM users
"#;

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let favorite_colors = serde_json::to_string(&user.profile().favorite_colors)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        let query = r#"
            INSERT OR REPLACE INTO users (
                id,
                user_name,
                passphrase_hash,
                favorite_colors,
                favorite_season,
                occupation,
                hobbies,
                cover_image_url,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user.id().as_str())
                    .bind(user.user_name())
                    .bind(user.passphrase_hash())
                    .bind(favorite_colors)
                    .bind(user.profile().favorite_season.as_deref())
                    .bind(user.profile().occupation.as_deref())
                    .bind(user.profile().hobbies.as_deref())
                    .bind(user.cover_image_url())
                    .bind(user.created_at()),
                "Save user",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ?1", SELECT_USER);

        let row: Option<UserRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.as_str()),
                "Find user by ID",
            )
            .await?;

        row.map(UserRow::try_into_user).transpose()
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE user_name = ?1", SELECT_USER);

        let row: Option<UserRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(user_name),
                "Find user by name",
            )
            .await?;

        row.map(UserRow::try_into_user).transpose()
    }
}
