//! Job posting row

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A posted job. Thin serde row over the store's `jobs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Store-owned enumeration (e.g. full_time, part_time, contract)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
    pub remote: bool,
    /// Store-owned enumeration (e.g. open, closed, draft)
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Build a new open job posting
    pub fn new(company_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            company_id,
            title: title.into(),
            description: None,
            location: None,
            employment_type: None,
            salary_min: None,
            salary_max: None,
            remote: false,
            status: "open".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_defaults() {
        let company_id = Uuid::new_v4();
        let job = Job::new(company_id, "Senior Rust Engineer");

        assert_eq!(job.company_id, company_id);
        assert_eq!(job.status, "open");
        assert!(!job.remote);
        assert!(job.description.is_none());
    }

    #[test]
    fn test_none_fields_skipped_in_json() {
        let job = Job::new(Uuid::new_v4(), "Engineer");
        let json = serde_json::to_string(&job).unwrap();
        assert!(!json.contains("salary_min"));
        assert!(json.contains("\"status\":\"open\""));
    }
}
