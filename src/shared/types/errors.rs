use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Single-message validation failure (first violated constraint).
    #[error("Validation: {0}")]
    Validation(String),

    /// Every violated field, in schema order.
    #[error("Validation: {}", .0.join(", "))]
    InvalidFields(Vec<String>),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Internal(#[from] InfraError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fields_display_joins_messages() {
        let err = DomainError::InvalidFields(vec!["Invalid email".into(), "Name is required".into()]);
        assert_eq!(err.to_string(), "Validation: Invalid email, Name is required");
    }

    #[test]
    fn not_found_keeps_the_lookup_key() {
        let err = DomainError::not_found("User", "email", "a@x.com");
        assert_eq!(err.to_string(), "Not found: User with email=a@x.com");
    }
}
