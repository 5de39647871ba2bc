use std::sync::Arc;

use chrono::NaiveDate;
use log::info;

use crate::application::dtos::DiaryEntryDto;
use mirai_domain::diary::DiaryEntryRepository;
use mirai_domain::shared::{DomainError, UserId};

pub struct DiaryQueries {
    entry_repo: Arc<dyn DiaryEntryRepository>,
}

impl DiaryQueries {
    pub fn new(entry_repo: Arc<dyn DiaryEntryRepository>) -> Self {
        Self { entry_repo }
    }

    /// Get one diary entry by date, or None when the page is blank
    pub async fn get_entry(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<DiaryEntryDto>, DomainError> {
        let date = parse_date(date)?;
        let entry = self
            .entry_repo
            .find_by_user_and_date(&UserId::from_string(user_id), date)
            .await?;
        Ok(entry.as_ref().map(DiaryEntryDto::from))
    }

    /// List a user's entries for a month, ordered by date ascending
    pub async fn list_month(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DiaryEntryDto>, DomainError> {
        let entries = self
            .entry_repo
            .list_by_month(&UserId::from_string(user_id), year, month)
            .await?;

        info!(
            "[diary] list_month user_id={} month={:04}-{:02} entries={}",
            user_id,
            year,
            month,
            entries.len()
        );

        Ok(entries.iter().map(DiaryEntryDto::from).collect())
    }
}

/// Parse a YYYY-MM-DD path parameter.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        DomainError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso() {
        let date = parse_date("2025-01-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("31/01/2025"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            parse_date("2025-02-30"),
            Err(DomainError::Validation(_))
        ));
    }
}
