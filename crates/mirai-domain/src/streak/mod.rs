mod engine;
mod value_objects;


pub use engine::{StreakEngine, StreakPolicy};
pub use value_objects::{StreakState, StreakWindow, STREAK_GOAL_DAYS};
