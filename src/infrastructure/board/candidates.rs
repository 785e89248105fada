//! Candidate repository over the remote table store

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::candidate::{Candidate, CandidateFilter, CandidateRepository};
use crate::domain::DomainError;
use crate::infrastructure::store::{Query, TableClient};

use super::{decode_row, encode_row, DEFAULT_LIST_LIMIT};

const CANDIDATES_TABLE: &str = "candidates";

/// `CandidateRepository` backed by the hosted store's `candidates` table
#[derive(Debug, Clone)]
pub struct StoreCandidateRepository {
    client: TableClient,
}

impl StoreCandidateRepository {
    pub fn new(client: TableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CandidateRepository for StoreCandidateRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Candidate>, DomainError> {
        let row = self
            .client
            .select_one(CANDIDATES_TABLE, Query::new().eq("id", id))
            .await?;

        row.map(decode_row).transpose()
    }

    async fn list(&self, filter: CandidateFilter) -> Result<Vec<Candidate>, DomainError> {
        let mut query = Query::new()
            .order_asc("full_name")
            .limit(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT));

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        if let Some(search) = &filter.search {
            query = query.ilike("full_name", search);
        }

        let rows = self.client.select(CANDIDATES_TABLE, query).await?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn insert(&self, candidate: Candidate) -> Result<Candidate, DomainError> {
        let created = self
            .client
            .insert(CANDIDATES_TABLE, &encode_row(&candidate)?)
            .await?;
        decode_row(created)
    }

    async fn update(&self, candidate: &Candidate) -> Result<Candidate, DomainError> {
        let updated = self
            .client
            .update(
                CANDIDATES_TABLE,
                &candidate.id.to_string(),
                &encode_row(candidate)?,
            )
            .await?;
        decode_row(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.client.delete(CANDIDATES_TABLE, &id.to_string()).await
    }
}
