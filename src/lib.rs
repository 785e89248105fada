//! HotGigs API
//!
//! Job board backend over a hosted table store:
//! - Credential subsystem (argon2 hashing, idempotent provisioning)
//! - JWT session tokens with an access/refresh pair
//! - Jobs, companies, candidates, and applications over the store's
//!   REST interface

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::account::{AccountService, Argon2Hasher, StoreAccountRepository};
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::board::{
    StoreApplicationRepository, StoreCandidateRepository, StoreCompanyRepository,
    StoreJobRepository,
};
use infrastructure::store::TableClient;

/// Wire up application state against the configured store
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let client = TableClient::new(&config.store)?;

    let account_repository = Arc::new(StoreAccountRepository::new(client.clone()));
    let hasher = Arc::new(Argon2Hasher::new());
    let account_service = Arc::new(AccountService::new(account_repository, hasher));

    let token_issuer = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.access_ttl_secs,
        config.auth.refresh_ttl_secs,
    )));

    Ok(AppState {
        account_service,
        token_issuer,
        jobs: Arc::new(StoreJobRepository::new(client.clone())),
        companies: Arc::new(StoreCompanyRepository::new(client.clone())),
        candidates: Arc::new(StoreCandidateRepository::new(client.clone())),
        applications: Arc::new(StoreApplicationRepository::new(client.clone())),
        store: Some(client),
    })
}
