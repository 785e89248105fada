//! In-memory account repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountFilter, AccountId, AccountRepository, EmailAddress};
use crate::domain::DomainError;

const DEFAULT_LIST_LIMIT: usize = 100;

/// In-memory implementation of `AccountRepository`.
///
/// Enforces the store's unique-email constraint and, when configured,
/// an accepted role enumeration, so the provisioning flow behaves the
/// same against it as against the hosted store.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    accepted_roles: Option<Vec<String>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the role values this repository accepts on write
    pub fn with_accepted_roles(roles: &[&str]) -> Self {
        Self {
            accounts: Arc::default(),
            accepted_roles: Some(roles.iter().map(|r| r.to_string()).collect()),
        }
    }

    fn check_role(&self, role: &str) -> Result<(), DomainError> {
        if let Some(roles) = &self.accepted_roles {
            if !roles.iter().any(|r| r == role) {
                return Err(DomainError::validation(format!(
                    "invalid input value for enum user_role: \"{}\"",
                    role
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email() == email).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        self.check_role(account.role())?;

        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email() == account.email()) {
            return Err(DomainError::conflict(format!(
                "Account with email '{}' already exists",
                account.email()
            )));
        }

        accounts.insert(account.id(), account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        self.check_role(account.role())?;

        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id()) {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.id()
            )));
        }

        accounts.insert(account.id(), account.clone());
        Ok(account.clone())
    }

    async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        accounts.remove(&id);
        Ok(())
    }

    async fn list(&self, filter: AccountFilter) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;

        let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let result: Vec<Account> = accounts
            .values()
            .filter(|a| {
                filter
                    .role
                    .as_deref()
                    .map(|role| a.role() == role)
                    .unwrap_or(true)
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account(email: &str, role: &str) -> Account {
        Account::new(
            EmailAddress::new(email).unwrap(),
            Some("hashed_password".to_string()),
            role,
        )
    }

    #[tokio::test]
    async fn test_insert_and_lookup_case_insensitive() {
        let repo = InMemoryAccountRepository::new();
        let account = test_account("User@Example.com", "candidate");

        repo.insert(account.clone()).await.unwrap();

        let found = repo
            .find_by_email(&EmailAddress::new("user@EXAMPLE.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().id(), account.id());
    }

    #[tokio::test]
    async fn test_unique_email_enforced() {
        let repo = InMemoryAccountRepository::new();

        repo.insert(test_account("user@example.com", "candidate"))
            .await
            .unwrap();

        let result = repo
            .insert(test_account("USER@example.com", "company"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_role_enumeration_enforced() {
        let repo = InMemoryAccountRepository::with_accepted_roles(&["candidate", "company"]);

        let result = repo.insert(test_account("admin@hotgigs.ai", "admin")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        repo.insert(test_account("admin@hotgigs.ai", "company"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let repo = InMemoryAccountRepository::new();
        let account = test_account("user@example.com", "candidate");

        let result = repo.update(&account).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryAccountRepository::new();
        let account = test_account("user@example.com", "candidate");

        repo.insert(account.clone()).await.unwrap();
        repo.delete(account.id()).await.unwrap();
        repo.delete(account.id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let repo = InMemoryAccountRepository::new();

        for i in 0..5 {
            repo.insert(test_account(&format!("user{}@example.com", i), "candidate"))
                .await
                .unwrap();
        }

        let listed = repo
            .list(AccountFilter {
                role: None,
                limit: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 3);
    }
}
