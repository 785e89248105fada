//! Application domain

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// A candidate's application to a job. Thin serde row over the store's
/// `applications` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    /// Store-owned enumeration (e.g. applied, reviewing, offered, rejected)
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(job_id: Uuid, candidate_id: Uuid) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            job_id,
            candidate_id,
            status: "applied".to_string(),
            cover_letter: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Filters for application listings
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub job_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Repository for job applications
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Application>, DomainError>;

    async fn list(&self, filter: ApplicationFilter)
        -> Result<Vec<Application>, DomainError>;

    async fn insert(&self, application: Application) -> Result<Application, DomainError>;

    async fn update(&self, application: &Application) -> Result<Application, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
