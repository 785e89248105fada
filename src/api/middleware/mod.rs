//! API middleware and extractors

pub mod auth;

pub use auth::{extract_bearer_token, RequireAdmin, RequirePrincipal};
