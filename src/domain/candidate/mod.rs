//! Candidate domain

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// A job seeker profile. Thin serde row over the store's `candidates`
/// table, optionally linked to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            account_id: None,
            full_name: full_name.into(),
            email: email.into(),
            headline: None,
            skills: Vec::new(),
            resume_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Filters for candidate listings
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Case-insensitive substring match on the full name
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Repository for candidate profiles
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Candidate>, DomainError>;

    async fn list(&self, filter: CandidateFilter) -> Result<Vec<Candidate>, DomainError>;

    async fn insert(&self, candidate: Candidate) -> Result<Candidate, DomainError>;

    async fn update(&self, candidate: &Candidate) -> Result<Candidate, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
