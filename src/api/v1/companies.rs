//! Company endpoint handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{RequireAdmin, RequirePrincipal};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::company::{Company, CompanyFilter};

#[derive(Debug, Deserialize, Default)]
pub struct ListCompaniesParams {
    pub search: Option<String>,
    pub industry: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

/// GET /v1/companies
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<ListCompaniesParams>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state
        .companies
        .list(CompanyFilter {
            search: params.search,
            industry: params.industry,
            limit: params.limit,
            offset: params.offset,
        })
        .await?;

    Ok(Json(companies))
}

/// GET /v1/companies/{company_id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .companies
        .get(company_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Company '{}' not found", company_id)))?;

    Ok(Json(company))
}

/// POST /v1/companies
pub async fn create_company(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Company name cannot be empty").with_param("name"));
    }

    let mut company = Company::new(request.name.trim());
    company.website = request.website;
    company.industry = request.industry;
    company.description = request.description;

    let created = state.companies.insert(company).await?;
    Ok(Json(created))
}

/// PUT /v1/companies/{company_id}
pub async fn update_company(
    State(state): State<AppState>,
    RequirePrincipal(_principal): RequirePrincipal,
    Path(company_id): Path<Uuid>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    let mut company = state
        .companies
        .get(company_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Company '{}' not found", company_id)))?;

    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("Company name cannot be empty").with_param("name"));
        }
        company.name = name.trim().to_string();
    }
    if let Some(website) = request.website {
        company.website = Some(website);
    }
    if let Some(industry) = request.industry {
        company.industry = Some(industry);
    }
    if let Some(description) = request.description {
        company.description = Some(description);
    }
    company.touch();

    let updated = state.companies.update(&company).await?;
    Ok(Json(updated))
}

/// DELETE /v1/companies/{company_id}
pub async fn delete_company(
    State(state): State<AppState>,
    RequireAdmin(_principal): RequireAdmin,
    Path(company_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.companies.delete(company_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
