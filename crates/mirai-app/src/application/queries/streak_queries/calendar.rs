use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use std::collections::HashMap;

use crate::application::dtos::{DiaryCalendarDto, DiaryDayDto, MonthStatsDto};
use mirai_domain::diary::{DiaryEntry, DiaryEntryRepository};
use mirai_domain::shared::{DomainError, UserId};

/// Get the journaling calendar for a specific month
pub async fn get_calendar(
    entry_repo: &dyn DiaryEntryRepository,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<DiaryCalendarDto, DomainError> {
    // Validate inputs
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation("Invalid month".to_string()));
    }

    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(DomainError::Validation("Invalid date".to_string()));
    }

    let first_day_next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = first_day_next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| DomainError::Validation("Invalid date".to_string()))?;

    let entries = entry_repo
        .list_by_month(&UserId::from_string(user_id), year, month)
        .await?;

    if entries.is_empty() {
        warn!(
            "[streak] calendar query empty result user_id={} month={:04}-{:02}",
            user_id, year, month
        );
    } else {
        info!(
            "[streak] calendar query user_id={} month={:04}-{:02} entries={}",
            user_id,
            year,
            month,
            entries.len()
        );
    }

    // Build a map for quick lookup
    let mut entry_map: HashMap<NaiveDate, DiaryEntry> = HashMap::new();
    for entry in entries {
        entry_map.insert(entry.date(), entry);
    }

    let total_days = last_day.day();
    let mut days = Vec::with_capacity(total_days as usize);
    let mut journaled_days = 0u32;

    for day in 1..=total_days {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DomainError::Validation("Invalid date".to_string()))?;
        let date_str = date.format("%Y-%m-%d").to_string();

        match entry_map.get(&date) {
            Some(entry) => {
                let is_journaled = entry.has_reflection();
                if is_journaled {
                    journaled_days += 1;
                }
                days.push(DiaryDayDto {
                    date: date_str,
                    is_journaled,
                    has_plan: entry.plan_text().is_some_and(|t| !t.trim().is_empty()),
                    has_artwork: entry.plan_image_url().is_some()
                        || entry.actual_image_url().is_some(),
                });
            }
            None => days.push(DiaryDayDto {
                date: date_str,
                is_journaled: false,
                has_plan: false,
                has_artwork: false,
            }),
        }
    }

    let journal_rate = if total_days > 0 {
        (journaled_days as f64 / total_days as f64) * 100.0
    } else {
        0.0
    };

    Ok(DiaryCalendarDto {
        user_id: user_id.to_string(),
        year,
        month,
        days,
        month_stats: MonthStatsDto {
            total_days,
            journaled_days,
            journal_rate,
        },
    })
}
