//! v1 API endpoints for the job board resources

pub mod applications;
pub mod candidates;
pub mod companies;
pub mod jobs;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/{job_id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/{company_id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/candidates/{candidate_id}",
            get(candidates::get_candidate)
                .put(candidates::update_candidate)
                .delete(candidates::delete_candidate),
        )
        .route(
            "/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/applications/{application_id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
}
