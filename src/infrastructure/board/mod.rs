//! Store-backed repositories for the job board tables

pub mod applications;
pub mod candidates;
pub mod companies;
pub mod jobs;

pub use applications::StoreApplicationRepository;
pub use candidates::StoreCandidateRepository;
pub use companies::StoreCompanyRepository;
pub use jobs::StoreJobRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::DomainError;

/// Default page size when a listing request has no explicit limit
pub(crate) const DEFAULT_LIST_LIMIT: usize = 50;

pub(crate) fn decode_row<T: DeserializeOwned>(value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::storage(format!("Malformed store row: {}", e)))
}

pub(crate) fn encode_row<T: Serialize>(row: &T) -> Result<Value, DomainError> {
    serde_json::to_value(row)
        .map_err(|e| DomainError::internal(format!("Failed to encode row: {}", e)))
}
