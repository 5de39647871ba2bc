use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

/// Optional profile details, folded into generated cover art and milestone
/// prompts when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub favorite_colors: Vec<String>,
    pub favorite_season: Option<String>,
    pub occupation: Option<String>,
    pub hobbies: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    user_name: String,
    passphrase_hash: String,
    profile: UserProfile,
    cover_image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        user_name: String,
        passphrase_hash: String,
        profile: UserProfile,
    ) -> Result<Self, DomainError> {
        if user_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "User name cannot be empty".to_string(),
            ));
        }
        if passphrase_hash.is_empty() {
            return Err(DomainError::InvalidCredentials(
                "Passphrase hash is required".to_string(),
            ));
        }

        Ok(Self {
            id: UserId::new(),
            user_name: user_name.trim().to_string(),
            passphrase_hash,
            profile,
            cover_image_url: None,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: UserId,
        user_name: String,
        passphrase_hash: String,
        profile: UserProfile,
        cover_image_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_name,
            passphrase_hash,
            profile,
            cover_image_url,
            created_at,
        }
    }

    pub fn set_cover_image_url(&mut self, url: String) {
        self.cover_image_url = Some(url);
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn passphrase_hash(&self) -> &str {
        &self.passphrase_hash
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image_url.as_deref()
    }

    /// Registration timestamp; the streak engine uses its date as the
    /// optional counting floor.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
