use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod clock;
pub use clock::{Clock, DateMode, SystemClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(GenerationId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1xxx)
    InvalidCredentials = 1001,
    ExpiredSession = 1002,
    MissingToken = 1003,

    // Resource Not Found (2xxx)
    UserNotFound = 2001,
    EntryNotFound = 2002,
    SessionNotFound = 2003,

    // Business Logic (3xxx)
    UserNameTaken = 3001,
    StreakNotCompleted = 3002,
    GenerationFailed = 3003,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DataIntegrityError = 4002,
    SerializationError = 4003,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    NetworkError = 5002,
    ExternalServiceError = 5003,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::InvalidCredentials
            | ErrorCode::ExpiredSession
            | ErrorCode::GenerationFailed
            | ErrorCode::NetworkError => ErrorSeverity::Warning,

            ErrorCode::UserNotFound
            | ErrorCode::EntryNotFound
            | ErrorCode::SessionNotFound
            | ErrorCode::UserNameTaken
            | ErrorCode::StreakNotCompleted
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::DataIntegrityError
            | ErrorCode::RepositoryError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            _ => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError | ErrorCode::ExternalServiceError | ErrorCode::GenerationFailed
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("User name already taken: {0}")]
    UserNameTaken(String),

    #[error("Streak not completed: {0}")]
    StreakNotCompleted(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            DomainError::SessionExpired(_) => ErrorCode::ExpiredSession,
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::EntryNotFound(_) => ErrorCode::EntryNotFound,
            DomainError::UserNameTaken(_) => ErrorCode::UserNameTaken,
            DomainError::StreakNotCompleted(_) => ErrorCode::StreakNotCompleted,
            DomainError::Generation(_) => ErrorCode::GenerationFailed,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::NotFound(_) => ErrorCode::EntryNotFound,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidCredentials(msg)
            | DomainError::SessionExpired(msg)
            | DomainError::UserNotFound(msg)
            | DomainError::EntryNotFound(msg)
            | DomainError::UserNameTaken(msg)
            | DomainError::StreakNotCompleted(msg)
            | DomainError::Generation(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Serialization(msg)
            | DomainError::NotFound(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
