//! Job posting endpoint handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::{RequireAdmin, RequirePrincipal};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::job::{Job, JobFilter};

/// Query parameters accepted by GET /v1/jobs
#[derive(Debug, Deserialize, Default)]
pub struct ListJobsParams {
    pub company_id: Option<Uuid>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub remote: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub remote: Option<bool>,
    pub status: Option<String>,
}

/// GET /v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<Vec<Job>>, ApiError> {
    debug!("Listing jobs");

    let jobs = state
        .jobs
        .list(JobFilter {
            company_id: params.company_id,
            status: params.status,
            search: params.search,
            limit: params.limit,
            offset: params.offset,
        })
        .await?;

    Ok(Json(jobs))
}

/// GET /v1/jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Job>, ApiError> {
    let job = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Job '{}' not found", job_id)))?;

    Ok(Json(job))
}

/// POST /v1/jobs
pub async fn create_job(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Job title cannot be empty").with_param("title"));
    }
    if let (Some(min), Some(max)) = (request.salary_min, request.salary_max) {
        if min > max {
            return Err(
                ApiError::bad_request("salary_min cannot exceed salary_max")
                    .with_param("salary_min"),
            );
        }
    }

    state
        .companies
        .get(request.company_id)
        .await?
        .ok_or_else(|| {
            ApiError::bad_request(format!("Company '{}' does not exist", request.company_id))
                .with_param("company_id")
        })?;

    let mut job = Job::new(request.company_id, request.title.trim());
    job.description = request.description;
    job.location = request.location;
    job.employment_type = request.employment_type;
    job.salary_min = request.salary_min;
    job.salary_max = request.salary_max;
    job.remote = request.remote;

    debug!(account = %principal.id, title = %job.title, "creating job");

    let created = state.jobs.insert(job).await?;
    Ok(Json(created))
}

/// PUT /v1/jobs/{job_id}
pub async fn update_job(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    let mut job = state
        .jobs
        .get(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Job '{}' not found", job_id)))?;

    if let Some(title) = request.title {
        if title.trim().is_empty() {
            return Err(ApiError::bad_request("Job title cannot be empty").with_param("title"));
        }
        job.title = title.trim().to_string();
    }
    if let Some(description) = request.description {
        job.description = Some(description);
    }
    if let Some(location) = request.location {
        job.location = Some(location);
    }
    if let Some(employment_type) = request.employment_type {
        job.employment_type = Some(employment_type);
    }
    if let Some(salary_min) = request.salary_min {
        job.salary_min = Some(salary_min);
    }
    if let Some(salary_max) = request.salary_max {
        job.salary_max = Some(salary_max);
    }
    if let Some(remote) = request.remote {
        job.remote = remote;
    }
    if let Some(status) = request.status {
        job.status = status;
    }
    job.touch();

    let updated = state.jobs.update(&job).await?;
    Ok(Json(updated))
}

/// DELETE /v1/jobs/{job_id}
pub async fn delete_job(
    State(state): State<AppState>,
    RequireAdmin(_principal): RequireAdmin,
    Path(job_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.jobs.delete(job_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
