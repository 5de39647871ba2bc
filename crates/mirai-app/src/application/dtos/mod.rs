mod diary_dto;
mod streak_dto;
mod user_dto;

pub use diary_dto::{ComposedDiaryDto, DiaryEntryDto, DiffSummaryDto, SaveEntryInput};
pub use streak_dto::{
    DiaryCalendarDto, DiaryDayDto, MilestoneArtDto, MonthStatsDto, StreakStatusDto,
    StreakWindowDto,
};
pub use user_dto::{AuthTokenDto, LoginInput, RegisterUserInput, UserDto};
