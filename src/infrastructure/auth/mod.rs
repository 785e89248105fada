//! Token issuance infrastructure

pub mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenIssuer, TokenPair, TokenUse};
