use serde::{Deserialize, Serialize};

use mirai_domain::user::{User, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub user_name: String,
    pub favorite_colors: Vec<String>,
    pub favorite_season: Option<String>,
    pub occupation: Option<String>,
    pub hobbies: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().as_str().to_string(),
            user_name: user.user_name().to_string(),
            favorite_colors: profile.favorite_colors.clone(),
            favorite_season: profile.favorite_season.clone(),
            occupation: profile.occupation.clone(),
            hobbies: profile.hobbies.clone(),
            cover_image_url: user.cover_image_url().map(str::to_string),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserInput {
    pub user_name: String,
    pub passphrase: String,
    #[serde(default)]
    pub favorite_colors: Vec<String>,
    pub favorite_season: Option<String>,
    pub occupation: Option<String>,
    pub hobbies: Option<String>,
}

impl RegisterUserInput {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            favorite_colors: self.favorite_colors.clone(),
            favorite_season: self.favorite_season.clone(),
            occupation: self.occupation.clone(),
            hobbies: self.hobbies.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub user_name: String,
    pub passphrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenDto {
    pub access_token: String,
    pub token_type: String, // always "bearer"
    pub expires_at: String,
    pub user: UserDto,
}
