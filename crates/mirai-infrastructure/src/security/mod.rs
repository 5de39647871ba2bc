use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use mirai_domain::shared::DomainError;
use mirai_domain::user::PassphraseHasher;

/// Argon2id passphrase hashing behind the domain's `PassphraseHasher` seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PassphraseHasher;

impl Argon2PassphraseHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PassphraseHasher for Argon2PassphraseHasher {
    fn hash(&self, passphrase: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(passphrase.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Infrastructure(format!("Passphrase hashing failed: {}", e)))
    }

    fn verify(&self, passphrase: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            DomainError::DataIntegrity(format!("Stored passphrase hash is invalid: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(passphrase.as_bytes(), &parsed)
            .is_ok())
    }
}
