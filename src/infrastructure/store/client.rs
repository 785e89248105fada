//! Remote table client
//!
//! All persistence goes through the hosted store's table-oriented REST
//! protocol. The client is constructed from configuration and injected
//! wherever a repository needs it; there is no global store handle.

use serde_json::Value;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::domain::DomainError;

use super::filter::Query;

/// HTTP client for the hosted table store.
///
/// Maps store responses onto the domain error taxonomy: uniqueness
/// violations become `Conflict`, schema/enumeration rejections become
/// `Validation`, transport failures become `Connectivity`.
#[derive(Debug, Clone)]
pub struct TableClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl TableClient {
    /// Build a client from store configuration
    pub fn new(config: &StoreConfig) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    /// Read rows matching the query
    pub async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, DomainError> {
        let request = self
            .authorize(self.http.get(self.table_url(table)))
            .query(query.params());

        let response = request.send().await.map_err(map_transport_error)?;
        let rows: Vec<Value> = check_status(response).await?.json().await.map_err(|e| {
            DomainError::storage(format!("Failed to parse store response: {}", e))
        })?;

        Ok(rows)
    }

    /// Read at most one row matching the query
    pub async fn select_one(
        &self,
        table: &str,
        query: Query,
    ) -> Result<Option<Value>, DomainError> {
        let mut rows = self.select(table, query.limit(1)).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Insert a row and return the created representation
    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value, DomainError> {
        let request = self
            .authorize(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row);

        let response = request.send().await.map_err(map_transport_error)?;
        let mut rows: Vec<Value> =
            check_status(response).await?.json().await.map_err(|e| {
                DomainError::storage(format!("Failed to parse store response: {}", e))
            })?;

        if rows.is_empty() {
            return Err(DomainError::storage(format!(
                "Store returned no representation for insert into '{}'",
                table
            )));
        }

        Ok(rows.remove(0))
    }

    /// Patch the row with the given id and return the updated representation
    pub async fn update(
        &self,
        table: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Value, DomainError> {
        let request = self
            .authorize(self.http.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch);

        let response = request.send().await.map_err(map_transport_error)?;
        let mut rows: Vec<Value> =
            check_status(response).await?.json().await.map_err(|e| {
                DomainError::storage(format!("Failed to parse store response: {}", e))
            })?;

        if rows.is_empty() {
            return Err(DomainError::not_found(format!(
                "No row with id '{}' in '{}'",
                id, table
            )));
        }

        Ok(rows.remove(0))
    }

    /// Delete the row with the given id; deleting a missing id succeeds
    pub async fn delete(&self, table: &str, id: &str) -> Result<(), DomainError> {
        let request = self
            .authorize(self.http.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))]);

        let response = request.send().await.map_err(map_transport_error)?;
        check_status(response).await?;

        Ok(())
    }

    /// Invoke a named server-side procedure
    pub async fn rpc(&self, name: &str, args: &Value) -> Result<Value, DomainError> {
        let url = format!("{}/rpc/{}", self.base_url, name);
        let request = self.authorize(self.http.post(url)).json(args);

        let response = request.send().await.map_err(map_transport_error)?;
        let response = check_status(response).await?;

        if response.content_length() == Some(0) {
            return Ok(Value::Null);
        }

        response.json().await.or(Ok(Value::Null))
    }
}

fn map_transport_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::connectivity(format!("Store request timed out: {}", e))
    } else if e.is_connect() {
        DomainError::connectivity(format!("Cannot reach store: {}", e))
    } else {
        DomainError::storage(format!("Store request failed: {}", e))
    }
}

/// Translate a non-success store response to a domain error
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DomainError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(match status.as_u16() {
        409 => DomainError::conflict(extract_message(&body, "duplicate key")),
        400 | 422 => DomainError::validation(extract_message(&body, "rejected by store schema")),
        404 => DomainError::not_found(extract_message(&body, "no such table or row")),
        401 | 403 => {
            DomainError::configuration(format!("Store rejected service credential: {}", body))
        }
        _ => DomainError::storage(format!("Store returned HTTP {}: {}", status, body)),
    })
}

/// Pull the store's `message` field out of an error payload, falling
/// back to the raw body or a default.
fn extract_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| {
            if body.is_empty() {
                fallback.to_string()
            } else {
                body.to_string()
            }
        })
}
