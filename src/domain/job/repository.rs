//! Job repository trait

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::Job;
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Filters for job listings
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub company_id: Option<Uuid>,
    pub status: Option<String>,
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Repository for job postings
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Job>, DomainError>;

    async fn list(&self, filter: JobFilter) -> Result<Vec<Job>, DomainError>;

    async fn insert(&self, job: Job) -> Result<Job, DomainError>;

    async fn update(&self, job: &Job) -> Result<Job, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
