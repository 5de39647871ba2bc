use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::persistence::SqliteRepositoryBase;
use mirai_domain::diary::{DiaryEntry, DiaryEntryRepository};
use mirai_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct DiaryEntryRow {
    user_id: String,
    entry_date: String,
    plan_text: Option<String>,
    plan_image_url: Option<String>,
    actual_text: Option<String>,
    actual_image_url: Option<String>,
    diff_text: Option<String>,
    tags: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl DiaryEntryRow {
    /// Malformed stored dates are rejected loudly instead of skipped: a
    /// silently dropped row would corrupt streak counts without signal.
    fn try_into_entry(self) -> Result<DiaryEntry, DomainError> {
        let date = NaiveDate::parse_from_str(&self.entry_date, "%Y-%m-%d").map_err(|e| {
            DomainError::Validation(format!(
                "Invalid entry_date for user {}: {} ({})",
                self.user_id, self.entry_date, e
            ))
        })?;

        let tags: Vec<String> = serde_json::from_str(&self.tags).map_err(|e| {
            DomainError::Serialization(format!(
                "Invalid tags for user {} on {}: {}",
                self.user_id, self.entry_date, e
            ))
        })?;

        Ok(DiaryEntry::restore(
            UserId::from_string(&self.user_id),
            date,
            self.plan_text,
            self.plan_image_url,
            self.actual_text,
            self.actual_image_url,
            self.diff_text,
            tags,
            self.created_at,
            self.updated_at,
            self.version,
        ))
    }
}

pub struct SqliteDiaryEntryRepository {
    base: SqliteRepositoryBase,
}

impl SqliteDiaryEntryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    async fn list_in_range(
        &self,
        user_id: &UserId,
        start: &str,
        end: &str,
        context: &str,
    ) -> Result<Vec<DiaryEntry>, DomainError> {
        let query = r#"
            SELECT
                user_id,
                entry_date,
                plan_text,
                plan_image_url,
                actual_text,
                actual_image_url,
                diff_text,
                tags,
                created_at,
                updated_at,
                version
            FROM diary_entries
            WHERE user_id = ?1
              AND entry_date >= ?2
              AND entry_date < ?3
            ORDER BY entry_date ASC
        "#;

        let rows: Vec<DiaryEntryRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(start)
                    .bind(end),
                context,
            )
            .await?;

        rows.into_iter().map(DiaryEntryRow::try_into_entry).collect()
    }
}

#[async_trait]
impl DiaryEntryRepository for SqliteDiaryEntryRepository {
    async fn save(&self, entry: &DiaryEntry) -> Result<(), DomainError> {
        let tags = serde_json::to_string(entry.tags())
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        let query = r#"
            INSERT OR REPLACE INTO diary_entries (
                user_id,
                entry_date,
                plan_text,
                plan_image_url,
                actual_text,
                actual_image_url,
                diff_text,
                tags,
                created_at,
                updated_at,
                version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(entry.user_id().as_str())
                    .bind(entry.date().format("%Y-%m-%d").to_string())
                    .bind(entry.plan_text())
                    .bind(entry.plan_image_url())
                    .bind(entry.actual_text())
                    .bind(entry.actual_image_url())
                    .bind(entry.diff_text())
                    .bind(tags)
                    .bind(entry.created_at())
                    .bind(entry.updated_at())
                    .bind(entry.version()),
                "Save diary entry",
            )
            .await?;

        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DiaryEntry>, DomainError> {
        let query = r#"
            SELECT
                user_id,
                entry_date,
                plan_text,
                plan_image_url,
                actual_text,
                actual_image_url,
                diff_text,
                tags,
                created_at,
                updated_at,
                version
            FROM diary_entries
            WHERE user_id = ?1 AND entry_date = ?2
        "#;

        let row: Option<DiaryEntryRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(date.format("%Y-%m-%d").to_string()),
                "Find diary entry by user and date",
            )
            .await?;

        row.map(DiaryEntryRow::try_into_entry).transpose()
    }

    async fn list_by_month(
        &self,
        user_id: &UserId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DiaryEntry>, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::Validation(format!("Invalid month: {}", month)));
        }

        // Lexicographic date-prefix range, [first of month, first of next month).
        let start = format!("{:04}-{:02}-01", year, month);
        let end = if month == 12 {
            format!("{:04}-01-01", year + 1)
        } else {
            format!("{:04}-{:02}-01", year, month + 1)
        };

        self.list_in_range(user_id, &start, &end, "List diary entries by month")
            .await
    }

    async fn list_by_year(
        &self,
        user_id: &UserId,
        year: i32,
    ) -> Result<Vec<DiaryEntry>, DomainError> {
        let start = format!("{:04}-01-01", year);
        let end = format!("{:04}-01-01", year + 1);

        self.list_in_range(user_id, &start, &end, "List diary entries by year")
            .await
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<DiaryEntry>, DomainError> {
        let query = r#"
            SELECT
                user_id,
                entry_date,
                plan_text,
                plan_image_url,
                actual_text,
                actual_image_url,
                diff_text,
                tags,
                created_at,
                updated_at,
                version
            FROM diary_entries
            WHERE user_id = ?1
            ORDER BY entry_date ASC
        "#;

        let rows: Vec<DiaryEntryRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.as_str()),
                "List diary entries by user",
            )
            .await?;

        rows.into_iter().map(DiaryEntryRow::try_into_entry).collect()
    }
}
