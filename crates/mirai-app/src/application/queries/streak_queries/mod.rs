use std::sync::Arc;

use crate::application::config::StreakSettings;
use crate::application::dtos::{DiaryCalendarDto, StreakStatusDto};
use mirai_domain::diary::DiaryEntryRepository;
use mirai_domain::shared::{Clock, DomainError};
use mirai_domain::streak::StreakWindow;
use mirai_domain::user::UserRepository;

mod calendar;
mod helpers;
mod streak;


pub struct StreakQueries {
    entry_repo: Arc<dyn DiaryEntryRepository>,
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    settings: StreakSettings,
}

impl StreakQueries {
    pub fn new(
        entry_repo: Arc<dyn DiaryEntryRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        settings: StreakSettings,
    ) -> Self {
        Self {
            entry_repo,
            user_repo,
            clock,
            settings,
        }
    }

    /// Get full streak status for a single user
    pub async fn get_streak_status(&self, user_id: &str) -> Result<StreakStatusDto, DomainError> {
        streak::get_streak_status(
            self.entry_repo.as_ref(),
            self.user_repo.as_ref(),
            &self.settings,
            user_id,
            self.clock.today(),
        )
        .await
    }

    /// Most recently completed seven-day window, if any. Domain-typed so
    /// callers can fetch the entries behind it.
    pub async fn latest_completed_window(
        &self,
        user_id: &str,
    ) -> Result<Option<StreakWindow>, DomainError> {
        let state = streak::compute_state(
            self.entry_repo.as_ref(),
            self.user_repo.as_ref(),
            &self.settings,
            user_id,
            self.clock.today(),
        )
        .await?;
        Ok(state.latest_completed_streak().cloned())
    }

    /// Get the journaling calendar for a specific month
    pub async fn get_calendar(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<DiaryCalendarDto, DomainError> {
        calendar::get_calendar(self.entry_repo.as_ref(), user_id, year, month).await
    }
}
