//! Account repository over the remote table store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::{Account, AccountFilter, AccountId, AccountRepository, EmailAddress};
use crate::domain::DomainError;
use crate::infrastructure::store::{Query, TableClient};

const ACCOUNTS_TABLE: &str = "accounts";
const DEFAULT_LIST_LIMIT: usize = 100;

/// `AccountRepository` backed by the hosted store's `accounts` table.
///
/// The unique constraint on `email` lives in the store; this layer only
/// translates its rejections into the domain taxonomy.
#[derive(Debug, Clone)]
pub struct StoreAccountRepository {
    client: TableClient,
}

impl StoreAccountRepository {
    pub fn new(client: TableClient) -> Self {
        Self { client }
    }
}

/// Wire form of an account row
#[derive(Debug, Serialize, Deserialize)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: Option<String>,
    role: String,
    is_admin: bool,
    is_active: bool,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn from_account(account: &Account) -> Self {
        Self {
            id: *account.id().as_uuid(),
            email: account.email().as_str().to_string(),
            password_hash: account.password_hash().map(String::from),
            role: account.role().to_string(),
            is_admin: account.is_admin(),
            is_active: account.is_active(),
            is_verified: account.is_verified(),
            created_at: account.created_at(),
            updated_at: account.updated_at(),
        }
    }

    fn into_account(self) -> Result<Account, DomainError> {
        let email = EmailAddress::new(&self.email).map_err(|e| {
            DomainError::storage(format!("Invalid email in store row: {}", e))
        })?;

        Ok(Account::restore(
            AccountId::parse(&self.id.to_string())
                .map_err(|e| DomainError::storage(format!("Invalid id in store row: {}", e)))?,
            email,
            self.password_hash,
            self.role,
            self.is_admin,
            self.is_active,
            self.is_verified,
            self.created_at,
            self.updated_at,
        ))
    }
}

fn row_from_value(value: serde_json::Value) -> Result<Account, DomainError> {
    let row: AccountRow = serde_json::from_value(value)
        .map_err(|e| DomainError::storage(format!("Malformed account row: {}", e)))?;
    row.into_account()
}

#[async_trait]
impl AccountRepository for StoreAccountRepository {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let row = self
            .client
            .select_one(ACCOUNTS_TABLE, Query::new().eq("id", id))
            .await?;

        row.map(row_from_value).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, DomainError> {
        let row = self
            .client
            .select_one(ACCOUNTS_TABLE, Query::new().eq("email", email.as_str()))
            .await?;

        row.map(row_from_value).transpose()
    }

    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        let row = AccountRow::from_account(&account);
        let body = serde_json::to_value(&row)
            .map_err(|e| DomainError::internal(format!("Failed to encode account: {}", e)))?;

        let created = self.client.insert(ACCOUNTS_TABLE, &body).await?;
        row_from_value(created)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let row = AccountRow::from_account(account);
        let body = serde_json::to_value(&row)
            .map_err(|e| DomainError::internal(format!("Failed to encode account: {}", e)))?;

        let updated = self
            .client
            .update(ACCOUNTS_TABLE, &account.id().to_string(), &body)
            .await?;
        row_from_value(updated)
    }

    async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
        self.client.delete(ACCOUNTS_TABLE, &id.to_string()).await
    }

    async fn list(&self, filter: AccountFilter) -> Result<Vec<Account>, DomainError> {
        let mut query = Query::new()
            .order_asc("created_at")
            .limit(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT));

        if let Some(role) = &filter.role {
            query = query.eq("role", role);
        }

        let rows = self.client.select(ACCOUNTS_TABLE, query).await?;
        rows.into_iter().map(row_from_value).collect()
    }
}
