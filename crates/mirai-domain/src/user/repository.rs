use async_trait::async_trait;

use super::User;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, DomainError>;
}

/// Credential hashing seam. Implemented with a real KDF in infrastructure;
/// swapped for a cheap fake in tests.
pub trait PassphraseHasher: Send + Sync {
    fn hash(&self, passphrase: &str) -> Result<String, DomainError>;

    fn verify(&self, passphrase: &str, hash: &str) -> Result<bool, DomainError>;
}
