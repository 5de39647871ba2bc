use mirai_domain::shared::DomainError;

/// Attaches a short label to an error while lifting it into the domain,
/// so bootstrap failures read as "what was being set up: what broke".
pub trait ResultExt<T> {
    fn infra_context(self, what: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn infra_context(self, what: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{}: {}", what, e)))
    }
}
