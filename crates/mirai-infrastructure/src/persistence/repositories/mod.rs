mod diary_entry_repo;
mod session_repo;
mod user_repo;

pub use diary_entry_repo::SqliteDiaryEntryRepository;
pub use session_repo::SqliteSessionRepository;
pub use user_repo::SqliteUserRepository;
