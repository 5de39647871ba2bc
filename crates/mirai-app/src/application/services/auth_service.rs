use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::application::dtos::{AuthTokenDto, LoginInput, RegisterUserInput, UserDto};
use mirai_domain::generation::{ImageGenerator, ImagePrompt};
use mirai_domain::session::{Session, SessionRepository};
use mirai_domain::shared::{DomainError, UserId};
use mirai_domain::user::{PassphraseHasher, User, UserRepository};

/// Registration, login and bearer-token verification.
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PassphraseHasher>,
    image_generator: Arc<dyn ImageGenerator>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        hasher: Arc<dyn PassphraseHasher>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            hasher,
            image_generator,
        }
    }

    /// Create a user, hash the passphrase and open a session. Cover art is
    /// generated best-effort; a failed render never fails registration.
    pub async fn register(&self, input: RegisterUserInput) -> Result<AuthTokenDto, DomainError> {
        let user_name = input.user_name.trim();
        if input.passphrase.is_empty() {
            return Err(DomainError::InvalidInput(
                "Passphrase cannot be empty".to_string(),
            ));
        }
        if self.user_repo.find_by_user_name(user_name).await?.is_some() {
            return Err(DomainError::UserNameTaken(user_name.to_string()));
        }

        let hash = self.hasher.hash(&input.passphrase)?;
        let mut user = User::new(user_name.to_string(), hash, input.profile())?;

        match self
            .image_generator
            .generate(&cover_prompt(&user))
            .await
        {
            Ok(image) => user.set_cover_image_url(image.public_url),
            Err(e) => warn!(
                "[auth] cover generation failed user_name={}: {}",
                user.user_name(),
                e
            ),
        }

        self.user_repo.save(&user).await?;

        info!(
            "[auth] registered user_id={} user_name={}",
            user.id().as_str(),
            user.user_name()
        );

        self.open_session(user).await
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthTokenDto, DomainError> {
        // One error for both unknown name and wrong passphrase; never reveal
        // which half failed.
        let user = self
            .user_repo
            .find_by_user_name(input.user_name.trim())
            .await?
            .ok_or_else(|| {
                DomainError::InvalidCredentials("Wrong user name or passphrase".to_string())
            })?;

        if !self.hasher.verify(&input.passphrase, user.passphrase_hash())? {
            return Err(DomainError::InvalidCredentials(
                "Wrong user name or passphrase".to_string(),
            ));
        }

        info!("[auth] login user_id={}", user.id().as_str());
        self.open_session(user).await
    }

    /// Resolve a bearer token to its user, rejecting expired sessions.
    pub async fn verify_token(&self, token: &str) -> Result<UserId, DomainError> {
        let session = self
            .session_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::InvalidCredentials("Unknown token".to_string()))?;

        if session.is_expired(Utc::now()) {
            self.session_repo.delete(token).await?;
            return Err(DomainError::SessionExpired(
                "Session expired, log in again".to_string(),
            ));
        }

        Ok(session.user_id().clone())
    }

    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        self.session_repo.delete(token).await
    }

    /// Re-render the cover for an existing user. Unlike registration this is
    /// user-initiated, so a failed render is surfaced.
    pub async fn regenerate_cover(&self, user_id: &UserId) -> Result<UserDto, DomainError> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.as_str().to_string()))?;

        let image = self.image_generator.generate(&cover_prompt(&user)).await?;
        user.set_cover_image_url(image.public_url);
        self.user_repo.save(&user).await?;

        info!("[auth] cover regenerated user_id={}", user_id.as_str());
        Ok(UserDto::from(&user))
    }

    async fn open_session(&self, user: User) -> Result<AuthTokenDto, DomainError> {
        let session = Session::issue(user.id().clone(), Utc::now());
        self.session_repo.save(&session).await?;

        Ok(AuthTokenDto {
            access_token: session.token().to_string(),
            token_type: "bearer".to_string(),
            expires_at: session.expires_at().to_rfc3339(),
            user: UserDto::from(&user),
        })
    }
}

/// Personalized book-cover prompt built from the profile fields.
fn cover_prompt(user: &User) -> ImagePrompt {
    let profile = user.profile();
    let mut prompt = format!(
        "A gentle watercolor book cover for {}'s future diary",
        user.user_name()
    );
    if !profile.favorite_colors.is_empty() {
        prompt.push_str(&format!(
            ", dominant colors {}",
            profile.favorite_colors.join(", ")
        ));
    }
    if let Some(season) = &profile.favorite_season {
        prompt.push_str(&format!(", with a {} atmosphere", season));
    }
    if let Some(hobbies) = &profile.hobbies {
        prompt.push_str(&format!(", hinting at {}", hobbies));
    }
    ImagePrompt {
        prompt,
        style: "watercolor".to_string(),
        aspect_ratio: "3:4".to_string(),
    }
}
