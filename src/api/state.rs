//! Application state for shared services

use std::sync::Arc;

use crate::domain::application::ApplicationRepository;
use crate::domain::candidate::CandidateRepository;
use crate::domain::company::CompanyRepository;
use crate::domain::job::JobRepository;
use crate::infrastructure::account::AccountServiceTrait;
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::store::TableClient;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub jobs: Arc<dyn JobRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub candidates: Arc<dyn CandidateRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    /// Store handle used by the readiness probe; absent when the app
    /// runs against in-memory repositories
    pub store: Option<TableClient>,
}
