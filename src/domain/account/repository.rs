//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId, EmailAddress};
use crate::domain::DomainError;

/// Filter for diagnostic account listings
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Restrict to a single role value
    pub role: Option<String>,
    /// Upper bound on returned rows; `None` falls back to the
    /// implementation default
    pub limit: Option<usize>,
}

/// Repository trait for account storage.
///
/// Backed by the external record store; uniqueness of the normalized
/// email is enforced by the store, not by this layer.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by its identifier
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Exact match on the normalized email; absence is not an error
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Account>, DomainError>;

    /// Insert a new account.
    ///
    /// Fails with `Conflict` when the email uniqueness constraint is
    /// violated at the store and `Validation` when a field (e.g. the
    /// role) is rejected by the store schema.
    async fn insert(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    /// Delete an account; deleting a non-existent id is not an error
    async fn delete(&self, id: AccountId) -> Result<(), DomainError>;

    /// Bounded diagnostic read. Never used on an authentication path.
    async fn list(&self, filter: AccountFilter) -> Result<Vec<Account>, DomainError>;

    /// Check whether an email is already taken
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
