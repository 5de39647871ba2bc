// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod diary;
pub mod generation;
pub mod session;
pub mod shared;
pub mod streak;
pub mod user;

// Re-exports for convenience
pub use shared::{Clock, DomainError, GenerationId, UserId};
pub use streak::{StreakEngine, StreakPolicy, StreakState, StreakWindow};
