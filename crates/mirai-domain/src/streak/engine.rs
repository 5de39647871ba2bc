use chrono::NaiveDate;

use super::value_objects::{StreakState, StreakWindow, STREAK_GOAL_DAYS};
use crate::diary::DiaryEntry;

/// Tunable streak rules.
///
/// `registration_floor` controls whether entries dated before the user's
/// signup count toward streaks. With the floor on (the default), imported or
/// demo entries predating registration are ignored.
#[derive(Debug, Clone, Copy)]
pub struct StreakPolicy {
    pub registration_floor: bool,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            registration_floor: true,
        }
    }
}

/// Pure streak computation over a user's entry history.
///
/// Holds no state and performs no I/O: callers fetch the entries and supply
/// the registration date and the evaluation date ("today"). Identical inputs
/// always produce identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakEngine {
    policy: StreakPolicy,
}

impl StreakEngine {
    pub fn new(policy: StreakPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> StreakPolicy {
        self.policy
    }

    /// Derive the full streak state: banked 7-day windows plus the still-open
    /// run counted since the last banked window.
    pub fn evaluate(
        &self,
        entries: &[DiaryEntry],
        registration_date: NaiveDate,
        today: NaiveDate,
    ) -> StreakState {
        let valid_dates = self.valid_dates(entries, registration_date);
        let completed = find_completed_windows(&valid_dates);
        let last_completed = completed.last().map(StreakWindow::completed_at);
        let current = current_streak(&valid_dates, last_completed, today);
        StreakState::new(completed, current)
    }

    /// Normalize the raw history into sorted, deduplicated journaled dates.
    /// Entries without a non-blank reflection are simply absent; they neither
    /// break nor extend anything on their own.
    fn valid_dates(&self, entries: &[DiaryEntry], registration_date: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = entries
            .iter()
            .filter(|e| e.has_reflection())
            .map(DiaryEntry::date)
            .filter(|d| !self.policy.registration_floor || *d >= registration_date)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

/// Greedy leftmost scan for non-overlapping 7-day windows.
///
/// On success the cursor jumps past the whole window: a banked streak
/// consumes its days and counting restarts from the next day, so a 14-day
/// run yields exactly two windows, never eight overlapping ones. This reset
/// rule is deliberate product behavior.
fn find_completed_windows(dates: &[NaiveDate]) -> Vec<StreakWindow> {
    let mut windows = Vec::new();
    let mut i = 0;

    while i + STREAK_GOAL_DAYS <= dates.len() {
        let mut run = 1;
        while run < STREAK_GOAL_DAYS && (dates[i + run] - dates[i + run - 1]).num_days() == 1 {
            run += 1;
        }

        if run == STREAK_GOAL_DAYS {
            windows.push(StreakWindow::restore(dates[i..i + STREAK_GOAL_DAYS].to_vec()));
            i += STREAK_GOAL_DAYS;
        } else {
            i += 1;
        }
    }

    windows
}

/// Length of the still-open run ending at (or one day before) `today`,
/// counted only over dates after the last banked window.
fn current_streak(
    dates: &[NaiveDate],
    last_completed: Option<NaiveDate>,
    today: NaiveDate,
) -> u32 {
    // Most recent first.
    let recent: Vec<NaiveDate> = dates
        .iter()
        .rev()
        .copied()
        .filter(|d| last_completed.is_none_or(|completed| *d > completed))
        .collect();

    let Some(&latest) = recent.first() else {
        return 0;
    };

    // A run whose newest entry is older than yesterday is already broken.
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1u32;
    for pair in recent.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
