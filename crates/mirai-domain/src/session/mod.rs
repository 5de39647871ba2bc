use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::{DomainError, UserId};

/// Bearer session backing the API's auth layer. Tokens are opaque UUIDs
/// persisted server-side; expiry mirrors the one-week login window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    token: String,
    user_id: UserId,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub const DEFAULT_TTL_DAYS: i64 = 7;

    pub fn issue(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            created_at: now,
            expires_at: now + Duration::days(Self::DEFAULT_TTL_DAYS),
        }
    }

    pub fn restore(
        token: String,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            user_id,
            created_at,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;

    async fn delete(&self, token: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod session_test {
    use super::*;

    #[test]
    fn test_issue_sets_one_week_expiry() {
        let now = Utc::now();
        let session = Session::issue(UserId::from_string("u1"), now);

        assert_eq!(session.expires_at() - now, Duration::days(7));
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::days(8)));
    }

    #[test]
    fn test_tokens_are_unique() {
        let now = Utc::now();
        let a = Session::issue(UserId::from_string("u1"), now);
        let b = Session::issue(UserId::from_string("u1"), now);
        assert_ne!(a.token(), b.token());
    }
}
