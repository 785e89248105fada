//! Application repository over the remote table store

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::application::{Application, ApplicationFilter, ApplicationRepository};
use crate::domain::DomainError;
use crate::infrastructure::store::{Query, TableClient};

use super::{decode_row, encode_row, DEFAULT_LIST_LIMIT};

const APPLICATIONS_TABLE: &str = "applications";

/// `ApplicationRepository` backed by the hosted store's `applications` table.
///
/// The store holds a unique constraint on `(job_id, candidate_id)`;
/// duplicate applications surface here as `Conflict`.
#[derive(Debug, Clone)]
pub struct StoreApplicationRepository {
    client: TableClient,
}

impl StoreApplicationRepository {
    pub fn new(client: TableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApplicationRepository for StoreApplicationRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Application>, DomainError> {
        let row = self
            .client
            .select_one(APPLICATIONS_TABLE, Query::new().eq("id", id))
            .await?;

        row.map(decode_row).transpose()
    }

    async fn list(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<Application>, DomainError> {
        let mut query = Query::new()
            .order_desc("created_at")
            .limit(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT));

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        if let Some(job_id) = filter.job_id {
            query = query.eq("job_id", job_id);
        }
        if let Some(candidate_id) = filter.candidate_id {
            query = query.eq("candidate_id", candidate_id);
        }
        if let Some(status) = &filter.status {
            query = query.eq("status", status);
        }

        let rows = self.client.select(APPLICATIONS_TABLE, query).await?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn insert(&self, application: Application) -> Result<Application, DomainError> {
        let created = self
            .client
            .insert(APPLICATIONS_TABLE, &encode_row(&application)?)
            .await?;
        decode_row(created)
    }

    async fn update(&self, application: &Application) -> Result<Application, DomainError> {
        let updated = self
            .client
            .update(
                APPLICATIONS_TABLE,
                &application.id.to_string(),
                &encode_row(application)?,
            )
            .await?;
        decode_row(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.client.delete(APPLICATIONS_TABLE, &id.to_string()).await
    }
}
