//! Authentication API endpoints
//!
//! Registration, login, token refresh, and current-account info.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::RequirePrincipal;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::{Account, AccountId, AuthOutcome, Principal};
use crate::infrastructure::account::RegisterRequest as ServiceRegisterRequest;
use crate::infrastructure::auth::TokenPair;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/oauth", post(oauth_login))
        .route("/refresh", post(refresh))
        .route("/me", get(get_current_account))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity-provider sign-in request; the identity has been verified
/// upstream
#[derive(Debug, Deserialize)]
pub struct OauthLoginRequest {
    pub provider: String,
    pub email: String,
    #[serde(default = "default_oauth_role")]
    pub role: String,
}

fn default_oauth_role() -> String {
    "candidate".to_string()
}

/// Refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Login/registration response carrying a token pair
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: AccountResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Account representation safe to expose; never carries the hash
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: String,
}

impl AccountResponse {
    fn from_account(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            email: account.email().as_str().to_string(),
            role: account.role().to_string(),
            is_admin: account.is_admin(),
            is_verified: account.is_verified(),
            created_at: account.created_at().to_rfc3339(),
        }
    }
}

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let account = state
        .account_service
        .register(ServiceRegisterRequest {
            email: request.email,
            password: request.password,
            role: request.role,
        })
        .await?;

    info!(email = %account.email(), "account registered");

    let tokens = state.token_issuer.issue_pair(&Principal::from_account(&account))?;

    Ok(Json(SessionResponse {
        user: AccountResponse::from_account(&account),
        tokens,
    }))
}

/// Login with email and password
///
/// POST /auth/login
///
/// Every failure mode returns the same 401 body; rejection reasons
/// stay in the server logs.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let outcome = state
        .account_service
        .authenticate(&request.email, &request.password)
        .await?;

    let principal = match outcome {
        AuthOutcome::Authenticated(principal) => principal,
        AuthOutcome::Rejected(_) => return Err(ApiError::invalid_credentials()),
    };

    let account = state
        .account_service
        .get(principal.id)
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    let tokens = state.token_issuer.issue_pair(&principal)?;

    Ok(Json(SessionResponse {
        user: AccountResponse::from_account(&account),
        tokens,
    }))
}

/// Sign in with an upstream-verified identity-provider account
///
/// POST /auth/oauth
///
/// Ensures a password-less account exists for the email and issues a
/// session. The account can never be used for password login.
pub async fn oauth_login(
    State(state): State<AppState>,
    Json(request): Json<OauthLoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let account = state
        .account_service
        .ensure_identity_account(&request.email, &request.role)
        .await?;

    if !account.is_active() {
        return Err(ApiError::invalid_credentials());
    }

    info!(provider = %request.provider, email = %account.email(), "identity-provider sign-in");

    let tokens = state.token_issuer.issue_pair(&Principal::from_account(&account))?;

    Ok(Json(SessionResponse {
        user: AccountResponse::from_account(&account),
        tokens,
    }))
}

/// Exchange a refresh token for a new token pair
///
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let claims = state
        .token_issuer
        .validate_refresh(&request.refresh_token)
        .map_err(|e| ApiError::unauthorized(format!("Invalid refresh token: {}", e)))?;

    let id = AccountId::parse(claims.account_id())
        .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;

    // Re-fetch so revoked or deactivated accounts cannot refresh.
    let account = state
        .account_service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account not found"))?;

    if !account.is_active() {
        return Err(ApiError::unauthorized("Account is deactivated"));
    }

    let tokens = state.token_issuer.issue_pair(&Principal::from_account(&account))?;

    Ok(Json(SessionResponse {
        user: AccountResponse::from_account(&account),
        tokens,
    }))
}

/// Get the current authenticated account
///
/// GET /auth/me
pub async fn get_current_account(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .account_service
        .get(principal.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account not found"))?;

    Ok(Json(AccountResponse::from_account(&account)))
}
