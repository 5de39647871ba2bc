pub mod diary_queries;
pub mod streak_queries;

pub use diary_queries::DiaryQueries;
pub use streak_queries::StreakQueries;
