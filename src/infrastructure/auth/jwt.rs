//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::account::Principal;
use crate::domain::DomainError;

/// Discriminator so a refresh token cannot be replayed as an access
/// token or vice versa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Account role
    pub role: String,
    /// Administrative flag
    pub is_admin: bool,
    /// Which endpoint class may consume this token
    pub token_use: TokenUse,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a principal
    pub fn new(principal: &Principal, token_use: TokenUse, ttl_secs: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_secs as i64);

        Self {
            sub: principal.id.to_string(),
            email: principal.email.as_str().to_string(),
            role: principal.role.clone(),
            is_admin: principal.is_admin,
            token_use,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get the account ID from claims
    pub fn account_id(&self) -> &str {
        &self.sub
    }
}

/// An access/refresh token pair issued together
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 7 * 24 * 3600,
        }
    }
}

/// Trait for JWT operations
pub trait TokenIssuer: Send + Sync + Debug {
    /// Issue an access/refresh pair for a principal
    fn issue_pair(&self, principal: &Principal) -> Result<TokenPair, DomainError>;

    /// Validate an access token and return the claims
    fn validate_access(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Validate a refresh token and return the claims
    fn validate_refresh(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service backed by a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl_secs", &self.config.access_ttl_secs)
            .field("refresh_ttl_secs", &self.config.refresh_ttl_secs)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn issue(
        &self,
        principal: &Principal,
        token_use: TokenUse,
        ttl_secs: u64,
    ) -> Result<String, DomainError> {
        let claims = JwtClaims::new(principal, token_use, ttl_secs);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign JWT: {}", e)))
    }

    fn validate(&self, token: &str, expected_use: TokenUse) -> Result<JwtClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        if token_data.claims.token_use != expected_use {
            return Err(DomainError::validation(
                "Token presented to the wrong endpoint class",
            ));
        }

        Ok(token_data.claims)
    }
}

impl TokenIssuer for JwtService {
    fn issue_pair(&self, principal: &Principal) -> Result<TokenPair, DomainError> {
        let access_token =
            self.issue(principal, TokenUse::Access, self.config.access_ttl_secs)?;
        let refresh_token =
            self.issue(principal, TokenUse::Refresh, self.config.refresh_ttl_secs)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in: self.config.access_ttl_secs,
        })
    }

    fn validate_access(&self, token: &str) -> Result<JwtClaims, DomainError> {
        self.validate(token, TokenUse::Access)
    }

    fn validate_refresh(&self, token: &str) -> Result<JwtClaims, DomainError> {
        self.validate(token, TokenUse::Refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountId, EmailAddress};

    fn create_principal() -> Principal {
        Principal {
            id: AccountId::generate(),
            email: EmailAddress::new("user@example.com").unwrap(),
            role: "candidate".to_string(),
            is_admin: false,
        }
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 3600, 86400))
    }

    #[test]
    fn test_issue_and_validate_pair() {
        let service = create_service();
        let principal = create_principal();

        let pair = service.issue_pair(&principal).unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);

        let claims = service.validate_access(&pair.access_token).unwrap();
        assert_eq!(claims.sub, principal.id.to_string());
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.role, "candidate");
        assert!(!claims.is_expired());

        let claims = service.validate_refresh(&pair.refresh_token).unwrap();
        assert_eq!(claims.token_use, TokenUse::Refresh);
    }

    #[test]
    fn test_token_use_is_enforced() {
        let service = create_service();
        let pair = service.issue_pair(&create_principal()).unwrap();

        // An access token must not pass as a refresh token.
        assert!(service.validate_refresh(&pair.access_token).is_err());
        assert!(service.validate_access(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        let result = service.validate_access("invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 3600, 86400));
        let service2 = JwtService::new(JwtConfig::new("secret-2", 3600, 86400));

        let pair = service1.issue_pair(&create_principal()).unwrap();

        let result = service2.validate_access(&pair.access_token);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();
        let principal = create_principal();

        let past = Utc::now() - Duration::hours(2);
        let claims = JwtClaims {
            sub: principal.id.to_string(),
            email: principal.email.as_str().to_string(),
            role: principal.role.clone(),
            is_admin: false,
            token_use: TokenUse::Access,
            iat: (past - Duration::hours(1)).timestamp(),
            exp: past.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        let result = service.validate_access(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_claims_carried() {
        let service = create_service();
        let mut principal = create_principal();
        principal.is_admin = true;
        principal.role = "company".to_string();

        let pair = service.issue_pair(&principal).unwrap();
        let claims = service.validate_access(&pair.access_token).unwrap();

        assert!(claims.is_admin);
        assert_eq!(claims.role, "company");
    }
}
