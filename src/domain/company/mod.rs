//! Company domain

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// A hiring company. Thin serde row over the store's `companies` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            website: None,
            industry: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Filters for company listings
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    pub industry: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Repository for companies
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Company>, DomainError>;

    async fn list(&self, filter: CompanyFilter) -> Result<Vec<Company>, DomainError>;

    async fn insert(&self, company: Company) -> Result<Company, DomainError>;

    async fn update(&self, company: &Company) -> Result<Company, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
