//! In-memory repository fakes shared by the application-layer tests.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use mirai_domain::diary::{DiaryEntry, DiaryEntryRepository};
use mirai_domain::generation::{GeneratedImage, ImageGenerator, ImagePrompt, TextGenerator};
use mirai_domain::session::{Session, SessionRepository};
use mirai_domain::shared::{Clock, DomainError, GenerationId, UserId};
use mirai_domain::user::{PassphraseHasher, User, UserRepository};

pub struct MockDiaryEntryRepository {
    entries: tokio::sync::RwLock<HashMap<(String, NaiveDate), DiaryEntry>>,
    /// When set, every call fails with this message wrapped in Repository
    fail_with: Option<String>,
}

impl MockDiaryEntryRepository {
    pub fn new() -> Self {
        Self {
            entries: tokio::sync::RwLock::new(HashMap::new()),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            entries: tokio::sync::RwLock::new(HashMap::new()),
            fail_with: Some(message.to_string()),
        }
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        match &self.fail_with {
            Some(msg) => Err(DomainError::Repository(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl DiaryEntryRepository for MockDiaryEntryRepository {
    async fn save(&self, entry: &DiaryEntry) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut entries = self.entries.write().await;
        entries.insert(
            (entry.user_id().as_str().to_string(), entry.date()),
            entry.clone(),
        );
        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DiaryEntry>, DomainError> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        Ok(entries.get(&(user_id.as_str().to_string(), date)).cloned())
    }

    async fn list_by_month(
        &self,
        user_id: &UserId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DiaryEntry>, DomainError> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        let mut result: Vec<DiaryEntry> = entries
            .values()
            .filter(|e| {
                e.user_id() == user_id && e.date().year() == year && e.date().month() == month
            })
            .cloned()
            .collect();
        result.sort_by_key(DiaryEntry::date);
        Ok(result)
    }

    async fn list_by_year(
        &self,
        user_id: &UserId,
        year: i32,
    ) -> Result<Vec<DiaryEntry>, DomainError> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        let mut result: Vec<DiaryEntry> = entries
            .values()
            .filter(|e| e.user_id() == user_id && e.date().year() == year)
            .cloned()
            .collect();
        result.sort_by_key(DiaryEntry::date);
        Ok(result)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<DiaryEntry>, DomainError> {
        self.check_failure()?;
        let entries = self.entries.read().await;
        let mut result: Vec<DiaryEntry> = entries
            .values()
            .filter(|e| e.user_id() == user_id)
            .cloned()
            .collect();
        result.sort_by_key(DiaryEntry::date);
        Ok(result)
    }
}

pub struct MockUserRepository {
    users: tokio::sync::RwLock<HashMap<String, User>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    pub async fn seed(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id().as_str().to_string(), user);
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.user_name() == user_name).cloned())
    }
}

pub struct MockSessionRepository {
    sessions: tokio::sync::RwLock<HashMap<String, Session>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    pub async fn seed(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token().to_string(), session);
    }
}

#[async_trait::async_trait]
impl SessionRepository for MockSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token().to_string(), session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Ok(())
    }
}

/// Clock pinned to a fixed date so streak evaluation is deterministic.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Reversible "hash" so tests can assert verify semantics without a KDF.
pub struct PlainHasher;

impl PassphraseHasher for PlainHasher {
    fn hash(&self, passphrase: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", passphrase))
    }

    fn verify(&self, passphrase: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{}", passphrase))
    }
}

pub struct MockTextGenerator {
    pub response: Result<String, String>,
}

impl MockTextGenerator {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(DomainError::Generation(msg.clone())),
        }
    }
}

pub struct MockImageGenerator {
    pub url: Option<String>,
    pub prompts: tokio::sync::RwLock<Vec<ImagePrompt>>,
}

impl MockImageGenerator {
    pub fn returning(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            prompts: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            url: None,
            prompts: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    pub async fn recorded_prompts(&self) -> Vec<ImagePrompt> {
        self.prompts.read().await.clone()
    }
}

#[async_trait::async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &ImagePrompt) -> Result<GeneratedImage, DomainError> {
        self.prompts.write().await.push(prompt.clone());
        match &self.url {
            Some(url) => Ok(GeneratedImage {
                generation_id: GenerationId::new(),
                public_url: url.clone(),
                prompt_used: prompt.prompt.clone(),
            }),
            None => Err(DomainError::Generation("image backend down".to_string())),
        }
    }
}

/// Entry whose reflection text is filled, so the date counts as journaled.
pub fn journaled_entry(user_id: &UserId, date: NaiveDate) -> DiaryEntry {
    let draft = mirai_domain::diary::DiaryEntryDraft {
        plan_text: Some(format!("plan for {}", date)),
        actual_text: Some(format!("what really happened on {}", date)),
        ..Default::default()
    };
    DiaryEntry::new(user_id.clone(), date, draft, chrono::Utc::now())
}

/// Seed a user with a known id; `created_at` controls the registration floor.
pub fn seeded_user(user_name: &str, created_at: chrono::DateTime<chrono::Utc>) -> User {
    User::restore(
        UserId::new(),
        user_name.to_string(),
        "hashed:secret".to_string(),
        mirai_domain::user::UserProfile::default(),
        None,
        created_at,
    )
}
