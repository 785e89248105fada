//! Company repository over the remote table store

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::company::{Company, CompanyFilter, CompanyRepository};
use crate::domain::DomainError;
use crate::infrastructure::store::{Query, TableClient};

use super::{decode_row, encode_row, DEFAULT_LIST_LIMIT};

const COMPANIES_TABLE: &str = "companies";

/// `CompanyRepository` backed by the hosted store's `companies` table
#[derive(Debug, Clone)]
pub struct StoreCompanyRepository {
    client: TableClient,
}

impl StoreCompanyRepository {
    pub fn new(client: TableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompanyRepository for StoreCompanyRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        let row = self
            .client
            .select_one(COMPANIES_TABLE, Query::new().eq("id", id))
            .await?;

        row.map(decode_row).transpose()
    }

    async fn list(&self, filter: CompanyFilter) -> Result<Vec<Company>, DomainError> {
        let mut query = Query::new()
            .order_asc("name")
            .limit(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT));

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        if let Some(industry) = &filter.industry {
            query = query.eq("industry", industry);
        }
        if let Some(search) = &filter.search {
            query = query.ilike("name", search);
        }

        let rows = self.client.select(COMPANIES_TABLE, query).await?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn insert(&self, company: Company) -> Result<Company, DomainError> {
        let created = self
            .client
            .insert(COMPANIES_TABLE, &encode_row(&company)?)
            .await?;
        decode_row(created)
    }

    async fn update(&self, company: &Company) -> Result<Company, DomainError> {
        let updated = self
            .client
            .update(COMPANIES_TABLE, &company.id.to_string(), &encode_row(company)?)
            .await?;
        decode_row(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.client.delete(COMPANIES_TABLE, &id.to_string()).await
    }
}
