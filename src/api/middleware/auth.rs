//! Request authentication extractors backed by JWT access tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::account::{AccountId, Principal};

/// Extractor that requires a valid access token.
///
/// The token comes from the `Authorization: Bearer <jwt>` header. The
/// account is re-fetched so a deactivated account loses access before
/// its token expires.
#[derive(Debug, Clone)]
pub struct RequirePrincipal(pub Principal);

impl FromRequestParts<AppState> for RequirePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating access token");

        let claims = state
            .token_issuer
            .validate_access(&token)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        let id = AccountId::parse(claims.account_id())
            .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;

        let account = state
            .account_service
            .get(id)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .ok_or_else(|| ApiError::unauthorized("Account not found"))?;

        if !account.is_active() {
            return Err(ApiError::unauthorized("Account is deactivated"));
        }

        Ok(RequirePrincipal(Principal::from_account(&account)))
    }
}

/// Extractor that additionally requires the admin flag
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Principal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequirePrincipal(principal) =
            RequirePrincipal::from_request_parts(parts, state).await?;

        if !principal.is_admin {
            return Err(ApiError::forbidden("Administrator access required"));
        }

        Ok(RequireAdmin(principal))
    }
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide an access token via 'Authorization: Bearer <token>'",
    ))
}
