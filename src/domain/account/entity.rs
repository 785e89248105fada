//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_email, AccountValidationError};

/// Opaque account identifier, generated at creation and immutable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address, normalized to lowercase at construction.
///
/// The normalized form is the uniqueness key: at most one account per
/// normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a normalized email address after validation
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        let email = email.into().trim().to_lowercase();
        validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, immutable after creation
    id: AccountId,
    /// Unique, case-normalized email
    email: EmailAddress,
    /// Salted argon2 hash - absent only for identity-provider accounts,
    /// never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: Option<String>,
    /// Role value from the store-owned enumeration; the store may reject
    /// unknown values at write time
    role: String,
    /// Administrative flag, independent of `role`
    is_admin: bool,
    is_active: bool,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh identifier
    pub fn new(
        email: EmailAddress,
        password_hash: Option<String>,
        role: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: AccountId::generate(),
            email,
            password_hash,
            role: role.into(),
            is_admin: false,
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Restore an account from stored row fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: AccountId,
        email: EmailAddress,
        password_hash: Option<String>,
        role: String,
        is_admin: bool,
        is_active: bool,
        is_verified: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            role,
            is_admin,
            is_active,
            is_verified,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Replace the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = Some(password_hash.into());
        self.touch();
    }

    /// Change the role value
    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
        self.touch();
    }

    /// Grant or revoke the administrative flag
    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
        self.touch();
    }

    /// Mark the email as verified
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.touch();
    }

    /// Deactivate the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Reactivate a deactivated account
    pub fn activate(&mut self) {
        if !self.is_active {
            self.is_active = true;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account(email: &str) -> Account {
        Account::new(
            EmailAddress::new(email).unwrap(),
            Some("hashed_password".to_string()),
            "candidate",
        )
    }

    #[test]
    fn test_email_normalization() {
        let email = EmailAddress::new("  Admin@HotGigs.AI ").unwrap();
        assert_eq!(email.as_str(), "admin@hotgigs.ai");
    }

    #[test]
    fn test_email_invalid() {
        assert!(EmailAddress::new("not-an-email").is_err());
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn test_normalized_emails_compare_equal() {
        let a = EmailAddress::new("User@Example.com").unwrap();
        let b = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_account_creation_defaults() {
        let account = test_account("user@example.com");

        assert!(account.is_active());
        assert!(!account.is_verified());
        assert!(!account.is_admin());
        assert_eq!(account.role(), "candidate");
        assert_eq!(account.password_hash(), Some("hashed_password"));
        assert_eq!(account.created_at(), account.updated_at());
    }

    #[test]
    fn test_account_ids_are_unique() {
        let a = test_account("a@example.com");
        let b = test_account("b@example.com");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_account_id_round_trip() {
        let id = AccountId::generate();
        let parsed = AccountId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_activate_deactivate() {
        let mut account = test_account("user@example.com");

        account.deactivate();
        assert!(!account.is_active());

        account.activate();
        assert!(account.is_active());
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut account = test_account("user@example.com");
        let before = account.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        account.set_password_hash("new_hash");
        assert_eq!(account.password_hash(), Some("new_hash"));
        assert!(account.updated_at() > before);
    }

    #[test]
    fn test_serialization_excludes_password_hash() {
        let account = test_account("user@example.com");

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_restore_preserves_fields() {
        let id = AccountId::generate();
        let created = Utc::now();
        let account = Account::restore(
            id,
            EmailAddress::new("user@example.com").unwrap(),
            None,
            "company".to_string(),
            true,
            false,
            true,
            created,
            created,
        );

        assert_eq!(account.id(), id);
        assert!(account.password_hash().is_none());
        assert!(account.is_admin());
        assert!(!account.is_active());
        assert!(account.is_verified());
    }
}
