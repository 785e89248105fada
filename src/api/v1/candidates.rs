//! Candidate profile endpoint handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{RequireAdmin, RequirePrincipal};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::candidate::{Candidate, CandidateFilter};

#[derive(Debug, Deserialize, Default)]
pub struct ListCandidatesParams {
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub full_name: String,
    pub email: String,
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateCandidateRequest {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume_url: Option<String>,
}

/// GET /v1/candidates (authenticated; profiles are not public)
pub async fn list_candidates(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Query(params): Query<ListCandidatesParams>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    let candidates = state
        .candidates
        .list(CandidateFilter {
            search: params.search,
            limit: params.limit,
            offset: params.offset,
        })
        .await?;

    Ok(Json(candidates))
}

/// GET /v1/candidates/{candidate_id}
pub async fn get_candidate(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Candidate>, ApiError> {
    let candidate = state
        .candidates
        .get(candidate_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Candidate '{}' not found", candidate_id)))?;

    Ok(Json(candidate))
}

/// POST /v1/candidates
pub async fn create_candidate(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<Json<Candidate>, ApiError> {
    if request.full_name.trim().is_empty() {
        return Err(ApiError::bad_request("Full name cannot be empty").with_param("full_name"));
    }
    if request.email.trim().is_empty() {
        return Err(ApiError::bad_request("Email cannot be empty").with_param("email"));
    }

    let mut candidate = Candidate::new(request.full_name.trim(), request.email.trim());
    candidate.account_id = Some(*principal.id.as_uuid());
    candidate.headline = request.headline;
    candidate.skills = request.skills;
    candidate.resume_url = request.resume_url;

    let created = state.candidates.insert(candidate).await?;
    Ok(Json(created))
}

/// PUT /v1/candidates/{candidate_id}
pub async fn update_candidate(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Path(candidate_id): Path<Uuid>,
    Json(request): Json<UpdateCandidateRequest>,
) -> Result<Json<Candidate>, ApiError> {
    let mut candidate = state
        .candidates
        .get(candidate_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Candidate '{}' not found", candidate_id)))?;

    // Only the owning account or an admin may edit a profile.
    let owns = candidate.account_id == Some(*principal.id.as_uuid());
    if !owns && !principal.is_admin {
        return Err(ApiError::forbidden("Cannot edit another account's profile"));
    }

    if let Some(full_name) = request.full_name {
        if full_name.trim().is_empty() {
            return Err(
                ApiError::bad_request("Full name cannot be empty").with_param("full_name")
            );
        }
        candidate.full_name = full_name.trim().to_string();
    }
    if let Some(headline) = request.headline {
        candidate.headline = Some(headline);
    }
    if let Some(skills) = request.skills {
        candidate.skills = skills;
    }
    if let Some(resume_url) = request.resume_url {
        candidate.resume_url = Some(resume_url);
    }
    candidate.touch();

    let updated = state.candidates.update(&candidate).await?;
    Ok(Json(updated))
}

/// DELETE /v1/candidates/{candidate_id}
pub async fn delete_candidate(
    State(state): State<AppState>,
    RequireAdmin(_principal): RequireAdmin,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.candidates.delete(candidate_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
