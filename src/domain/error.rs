use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Store unreachable: {message}")]
    Connectivity { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether a caller-side bounded retry is appropriate.
    ///
    /// Conflicts and validation failures are terminal: a conflict is
    /// resolved by re-fetching the existing record, not by re-sending
    /// the insert.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Account 'test-id' not found");
        assert_eq!(error.to_string(), "Not found: Account 'test-id' not found");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Email already registered");
        assert_eq!(error.to_string(), "Conflict: Email already registered");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(DomainError::connectivity("timed out").is_retryable());
        assert!(!DomainError::conflict("duplicate email").is_retryable());
        assert!(!DomainError::validation("bad role").is_retryable());
        assert!(!DomainError::storage("boom").is_retryable());
    }
}
