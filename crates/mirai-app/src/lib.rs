pub mod application;
pub mod bootstrap;

pub use application::config::StreakSettings;
pub use bootstrap::{AppContext, AppSettings};
