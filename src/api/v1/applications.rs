//! Job application endpoint handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::{RequireAdmin, RequirePrincipal};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::application::{Application, ApplicationFilter};

const APPLICATION_STATUSES: &[&str] =
    &["applied", "screening", "interview", "offer", "hired", "rejected"];

#[derive(Debug, Deserialize, Default)]
pub struct ListApplicationsParams {
    pub job_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateApplicationRequest {
    pub status: String,
}

/// GET /v1/applications
pub async fn list_applications(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Query(params): Query<ListApplicationsParams>,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = state
        .applications
        .list(ApplicationFilter {
            job_id: params.job_id,
            candidate_id: params.candidate_id,
            status: params.status,
            limit: params.limit,
            offset: params.offset,
        })
        .await?;

    Ok(Json(applications))
}

/// GET /v1/applications/{application_id}
pub async fn get_application(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Application>, ApiError> {
    let application = state.applications.get(application_id).await?.ok_or_else(|| {
        ApiError::not_found(format!("Application '{}' not found", application_id))
    })?;

    Ok(Json(application))
}

/// POST /v1/applications
///
/// The store's unique constraint on (job_id, candidate_id) turns a
/// second application into a 409.
pub async fn create_application(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<Json<Application>, ApiError> {
    let job = state
        .jobs
        .get(request.job_id)
        .await?
        .ok_or_else(|| {
            ApiError::bad_request(format!("Job '{}' does not exist", request.job_id))
                .with_param("job_id")
        })?;

    if job.status != "open" {
        return Err(ApiError::bad_request("Job is not accepting applications"));
    }

    state
        .candidates
        .get(request.candidate_id)
        .await?
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "Candidate '{}' does not exist",
                request.candidate_id
            ))
            .with_param("candidate_id")
        })?;

    let mut application = Application::new(request.job_id, request.candidate_id);
    application.cover_letter = request.cover_letter;

    debug!(
        account = %principal.id,
        job_id = %request.job_id,
        "submitting application"
    );

    let created = state.applications.insert(application).await?;
    Ok(Json(created))
}

/// DELETE /v1/applications/{application_id}
pub async fn delete_application(
    State(state): State<AppState>,
    RequireAdmin(_principal): RequireAdmin,
    Path(application_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.applications.delete(application_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// PUT /v1/applications/{application_id}
pub async fn update_application(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path(application_id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<Application>, ApiError> {
    if !APPLICATION_STATUSES.contains(&request.status.as_str()) {
        return Err(ApiError::bad_request(format!(
            "Unknown status '{}'. Expected one of: {}",
            request.status,
            APPLICATION_STATUSES.join(", ")
        ))
        .with_param("status"));
    }

    // Moving an application through the pipeline is an employer action.
    if !principal.is_admin && principal.role == "candidate" {
        return Err(ApiError::forbidden("Candidates cannot change application status"));
    }

    let mut application = state.applications.get(application_id).await?.ok_or_else(|| {
        ApiError::not_found(format!("Application '{}' not found", application_id))
    })?;

    application.status = request.status;
    application.touch();

    let updated = state.applications.update(&application).await?;
    Ok(Json(updated))
}
