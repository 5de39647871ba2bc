mod auth_service;
mod diary_service;
mod milestone_service;

pub use auth_service::AuthService;
pub use diary_service::DiaryService;
pub use milestone_service::MilestoneService;
