use chrono::{Datelike, NaiveDate};
use futures::future::try_join_all;

use mirai_domain::diary::{DiaryEntry, DiaryEntryRepository};
use mirai_domain::shared::{DomainError, UserId};
use mirai_domain::user::{User, UserRepository};

/// Fetch the user or fail; streak answers are meaningless without the
/// registration date.
pub async fn require_user(
    user_repo: &dyn UserRepository,
    user_id: &str,
) -> Result<User, DomainError> {
    user_repo
        .find_by_id(&UserId::from_string(user_id))
        .await?
        .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
}

/// Load the entry history relevant to streak evaluation, ordered by date
/// ascending. With the registration floor on, only the years from
/// registration through today matter and are fetched concurrently; without
/// the floor any backdated page can count, so the whole history is loaded.
pub async fn fetch_history(
    entry_repo: &dyn DiaryEntryRepository,
    user_id: &UserId,
    registration_date: NaiveDate,
    today: NaiveDate,
    registration_floor: bool,
) -> Result<Vec<DiaryEntry>, DomainError> {
    if !registration_floor {
        return entry_repo.list_by_user(user_id).await;
    }

    let first_year = registration_date.year().min(today.year());
    let last_year = today.year();

    let fetches = (first_year..=last_year).map(|year| entry_repo.list_by_year(user_id, year));
    let per_year = try_join_all(fetches).await?;

    let mut entries: Vec<DiaryEntry> = per_year.into_iter().flatten().collect();
    entries.sort_by_key(DiaryEntry::date);
    Ok(entries)
}
