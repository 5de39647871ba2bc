use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// A streak is banked after this many consecutive journaled days.
pub const STREAK_GOAL_DAYS: usize = 7;

/// A completed run of exactly seven calendar-consecutive journaled dates.
/// `completed_at` equals the last date of the run, the day the goal was hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    dates: Vec<NaiveDate>,
    completed_at: NaiveDate,
}

impl StreakWindow {
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, DomainError> {
        if dates.len() != STREAK_GOAL_DAYS {
            return Err(DomainError::Validation(format!(
                "Streak window must cover exactly {} days, got {}",
                STREAK_GOAL_DAYS,
                dates.len()
            )));
        }
        for pair in dates.windows(2) {
            if (pair[1] - pair[0]).num_days() != 1 {
                return Err(DomainError::Validation(format!(
                    "Streak window dates must be calendar-consecutive: {} -> {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self::restore(dates))
    }

    /// Rehydrate without re-checking invariants. Crate-internal: the engine
    /// constructs the dates consecutively itself; everyone else goes through
    /// `new` and its checks.
    pub(crate) fn restore(dates: Vec<NaiveDate>) -> Self {
        debug_assert!(!dates.is_empty());
        let start_date = dates[0];
        let end_date = dates[dates.len() - 1];
        Self {
            start_date,
            end_date,
            dates,
            completed_at: end_date,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn completed_at(&self) -> NaiveDate {
        self.completed_at
    }
}

/// Streak facts derived from a user's entry history. Never persisted;
/// recomputed from stored entries on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    completed_streaks: Vec<StreakWindow>,
    current_streak: u32,
}

impl StreakState {
    pub fn new(completed_streaks: Vec<StreakWindow>, current_streak: u32) -> Self {
        Self {
            completed_streaks,
            current_streak,
        }
    }

    /// Completed windows ordered by start date ascending.
    pub fn completed_streaks(&self) -> &[StreakWindow] {
        &self.completed_streaks
    }

    pub fn latest_completed_streak(&self) -> Option<&StreakWindow> {
        self.completed_streaks.last()
    }

    pub fn has_seven_day_streak(&self) -> bool {
        !self.completed_streaks.is_empty()
    }

    /// Consecutive journaled days since the last banked window, up to today.
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn needed_for_seven(&self) -> u32 {
        (STREAK_GOAL_DAYS as u32).saturating_sub(self.current_streak)
    }
}
