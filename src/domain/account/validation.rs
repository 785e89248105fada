//! Account validation utilities

use thiserror::Error;

/// Errors that can occur during account validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email is missing an '@' separator")]
    MissingAtSign,

    #[error("Email local part cannot be empty")]
    EmptyLocalPart,

    #[error("Email domain cannot be empty")]
    EmptyDomain,

    #[error("Email domain is missing a '.'")]
    DomainMissingDot,

    #[error("Email contains whitespace")]
    EmailContainsWhitespace,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Role cannot be empty")]
    EmptyRole,

    #[error("Role exceeds maximum length of {0} characters")]
    RoleTooLong(usize),
}

const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_ROLE_LENGTH: usize = 50;

/// Validate an email address
///
/// Rules:
/// - Cannot be empty, no whitespace
/// - Maximum 254 characters
/// - Exactly one non-empty local part and domain around '@'
/// - Domain contains a '.'
pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    if email.is_empty() {
        return Err(AccountValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AccountValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(AccountValidationError::EmailContainsWhitespace);
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(AccountValidationError::MissingAtSign)?;

    if local.is_empty() {
        return Err(AccountValidationError::EmptyLocalPart);
    }

    if domain.is_empty() {
        return Err(AccountValidationError::EmptyDomain);
    }

    if !domain.contains('.') {
        return Err(AccountValidationError::DomainMissingDot);
    }

    Ok(())
}

/// Validate a plaintext password
///
/// Rules:
/// - Minimum 6 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), AccountValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate a role value before sending it to the store.
///
/// The accepted role enumeration is owned by the store schema, so this
/// only rejects values the store could never accept.
pub fn validate_role(role: &str) -> Result<(), AccountValidationError> {
    if role.is_empty() {
        return Err(AccountValidationError::EmptyRole);
    }

    if role.len() > MAX_ROLE_LENGTH {
        return Err(AccountValidationError::RoleTooLong(MAX_ROLE_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("admin@hotgigs.ai").is_ok());
        assert!(validate_email("first.last@example.co.uk").is_ok());
        assert!(validate_email("a@b.io").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(AccountValidationError::EmptyEmail));
    }

    #[test]
    fn test_email_missing_at() {
        assert_eq!(
            validate_email("admin.hotgigs.ai"),
            Err(AccountValidationError::MissingAtSign)
        );
    }

    #[test]
    fn test_email_empty_parts() {
        assert_eq!(
            validate_email("@hotgigs.ai"),
            Err(AccountValidationError::EmptyLocalPart)
        );
        assert_eq!(
            validate_email("admin@"),
            Err(AccountValidationError::EmptyDomain)
        );
    }

    #[test]
    fn test_email_domain_without_dot() {
        assert_eq!(
            validate_email("admin@localhost"),
            Err(AccountValidationError::DomainMissingDot)
        );
    }

    #[test]
    fn test_email_with_whitespace() {
        assert_eq!(
            validate_email("admin @hotgigs.ai"),
            Err(AccountValidationError::EmailContainsWhitespace)
        );
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long),
            Err(AccountValidationError::EmailTooLong(254))
        );
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("admin123").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("12345"),
            Err(AccountValidationError::PasswordTooShort(6))
        );
    }

    #[test]
    fn test_password_too_long() {
        let long = "a".repeat(129);
        assert_eq!(
            validate_password(&long),
            Err(AccountValidationError::PasswordTooLong(128))
        );
    }

    #[test]
    fn test_roles() {
        assert!(validate_role("candidate").is_ok());
        assert!(validate_role("company").is_ok());
        assert_eq!(validate_role(""), Err(AccountValidationError::EmptyRole));
        assert_eq!(
            validate_role(&"r".repeat(51)),
            Err(AccountValidationError::RoleTooLong(50))
        );
    }
}
