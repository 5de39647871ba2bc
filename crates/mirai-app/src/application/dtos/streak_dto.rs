use serde::{Deserialize, Serialize};

use mirai_domain::streak::StreakWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakWindowDto {
    pub start_date: String, // YYYY-MM-DD
    pub end_date: String,
    pub dates: Vec<String>,
    pub completed_at: String,
}

impl From<&StreakWindow> for StreakWindowDto {
    fn from(window: &StreakWindow) -> Self {
        Self {
            start_date: window.start_date().format("%Y-%m-%d").to_string(),
            end_date: window.end_date().format("%Y-%m-%d").to_string(),
            dates: window
                .dates()
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            completed_at: window.completed_at().format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakStatusDto {
    pub user_id: String,
    pub has_seven_day_streak: bool,
    pub completed_streaks_count: u32,
    pub completed_streaks: Vec<StreakWindowDto>,
    pub latest_completed_streak: Option<StreakWindowDto>,
    pub current_streak: u32,
    pub needed_for_seven: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryDayDto {
    pub date: String, // YYYY-MM-DD
    pub is_journaled: bool,
    pub has_plan: bool,
    pub has_artwork: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryCalendarDto {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<DiaryDayDto>,
    pub month_stats: MonthStatsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub journaled_days: u32,
    pub journal_rate: f64, // percentage (0.0 - 100.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneArtDto {
    pub user_id: String,
    pub generation_id: String,
    pub image_url: String,
    pub prompt_used: String,
    pub window: StreakWindowDto,
}
