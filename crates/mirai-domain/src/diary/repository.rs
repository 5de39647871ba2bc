use async_trait::async_trait;
use chrono::NaiveDate;

use super::DiaryEntry;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait DiaryEntryRepository: Send + Sync {
    /// Save (upsert) an entry, keyed on `(user_id, date)`.
    async fn save(&self, entry: &DiaryEntry) -> Result<(), DomainError>;

    /// Find the entry for one user on one date.
    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DiaryEntry>, DomainError>;

    /// List a user's entries for a calendar month, ordered by date ascending.
    async fn list_by_month(
        &self,
        user_id: &UserId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DiaryEntry>, DomainError>;

    /// List a user's entries for a calendar year, ordered by date ascending.
    async fn list_by_year(&self, user_id: &UserId, year: i32)
        -> Result<Vec<DiaryEntry>, DomainError>;

    /// List everything a user has ever written, ordered by date ascending.
    /// Needed whenever streaks are counted without a registration floor.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<DiaryEntry>, DomainError>;
}
