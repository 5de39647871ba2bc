use chrono::NaiveDate;
use log::info;

use crate::application::config::StreakSettings;
use crate::application::dtos::{StreakStatusDto, StreakWindowDto};
use mirai_domain::diary::DiaryEntryRepository;
use mirai_domain::shared::DomainError;
use mirai_domain::streak::{StreakEngine, StreakPolicy, StreakState};
use mirai_domain::user::UserRepository;

use super::helpers;

/// Recompute streak state from the stored entry history. Nothing is cached;
/// every call re-derives from what the repository returns.
pub async fn compute_state(
    entry_repo: &dyn DiaryEntryRepository,
    user_repo: &dyn UserRepository,
    settings: &StreakSettings,
    user_id: &str,
    today: NaiveDate,
) -> Result<StreakState, DomainError> {
    let user = helpers::require_user(user_repo, user_id).await?;
    let registration_date = user.created_at().date_naive();
    let entries = helpers::fetch_history(
        entry_repo,
        user.id(),
        registration_date,
        today,
        settings.registration_floor,
    )
    .await?;

    let engine = StreakEngine::new(StreakPolicy {
        registration_floor: settings.registration_floor,
    });
    Ok(engine.evaluate(&entries, registration_date, today))
}

/// Get full streak status for a single user
pub async fn get_streak_status(
    entry_repo: &dyn DiaryEntryRepository,
    user_repo: &dyn UserRepository,
    settings: &StreakSettings,
    user_id: &str,
    today: NaiveDate,
) -> Result<StreakStatusDto, DomainError> {
    let state = compute_state(entry_repo, user_repo, settings, user_id, today).await?;

    let dto = StreakStatusDto {
        user_id: user_id.to_string(),
        has_seven_day_streak: state.has_seven_day_streak(),
        completed_streaks_count: state.completed_streaks().len() as u32,
        completed_streaks: state
            .completed_streaks()
            .iter()
            .map(StreakWindowDto::from)
            .collect(),
        latest_completed_streak: state.latest_completed_streak().map(StreakWindowDto::from),
        current_streak: state.current_streak(),
        needed_for_seven: state.needed_for_seven(),
    };

    info!(
        "[streak] get_streak_status user_id={} completed={} current={} needed={}",
        dto.user_id, dto.completed_streaks_count, dto.current_streak, dto.needed_for_seven
    );

    Ok(dto)
}
