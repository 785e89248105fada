//! Job repository over the remote table store

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::job::{Job, JobFilter, JobRepository};
use crate::domain::DomainError;
use crate::infrastructure::store::{Query, TableClient};

use super::{decode_row, encode_row, DEFAULT_LIST_LIMIT};

const JOBS_TABLE: &str = "jobs";

/// `JobRepository` backed by the hosted store's `jobs` table
#[derive(Debug, Clone)]
pub struct StoreJobRepository {
    client: TableClient,
}

impl StoreJobRepository {
    pub fn new(client: TableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobRepository for StoreJobRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Job>, DomainError> {
        let row = self
            .client
            .select_one(JOBS_TABLE, Query::new().eq("id", id))
            .await?;

        row.map(decode_row).transpose()
    }

    async fn list(&self, filter: JobFilter) -> Result<Vec<Job>, DomainError> {
        let mut query = Query::new()
            .order_desc("created_at")
            .limit(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT));

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        if let Some(company_id) = filter.company_id {
            query = query.eq("company_id", company_id);
        }
        if let Some(status) = &filter.status {
            query = query.eq("status", status);
        }
        if let Some(search) = &filter.search {
            query = query.ilike("title", search);
        }

        let rows = self.client.select(JOBS_TABLE, query).await?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn insert(&self, job: Job) -> Result<Job, DomainError> {
        let created = self.client.insert(JOBS_TABLE, &encode_row(&job)?).await?;
        decode_row(created)
    }

    async fn update(&self, job: &Job) -> Result<Job, DomainError> {
        let updated = self
            .client
            .update(JOBS_TABLE, &job.id.to_string(), &encode_row(job)?)
            .await?;
        decode_row(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.client.delete(JOBS_TABLE, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::StoreConfig;

    fn repo_for(server: &MockServer) -> StoreJobRepository {
        let client = TableClient::new(&StoreConfig {
            url: server.uri(),
            service_key: "service-key".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        StoreJobRepository::new(client)
    }

    fn job_row(id: Uuid, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "company_id": Uuid::new_v4(),
            "title": title,
            "remote": false,
            "status": "open",
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_get_decodes_row() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("id", format!("eq.{}", id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([job_row(id, "Rust Engineer")])),
            )
            .mount(&server)
            .await;

        let job = repo_for(&server).get(id).await.unwrap().unwrap();
        assert_eq!(job.id, id);
        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.status, "open");
    }

    #[tokio::test]
    async fn test_list_applies_filters() {
        let server = MockServer::start().await;
        let company_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("company_id", format!("eq.{}", company_id)))
            .and(query_param("status", "eq.open"))
            .and(query_param("title", "ilike.*rust*"))
            .and(query_param("order", "created_at.desc"))
            .and(query_param("limit", "10"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([job_row(Uuid::new_v4(), "Rust Engineer")])),
            )
            .mount(&server)
            .await;

        let jobs = repo_for(&server)
            .list(JobFilter {
                company_id: Some(company_id),
                status: Some("open".to_string()),
                search: Some("rust".to_string()),
                limit: Some(10),
                offset: None,
            })
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("DELETE"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let repo = repo_for(&server);
        repo.delete(id).await.unwrap();
        repo.delete(id).await.unwrap();
    }
}
