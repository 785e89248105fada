//! Account domain
//!
//! Domain types and traits for stored identity records: the account
//! entity, email normalization, validation, repository traits, and the
//! authentication outcome types.

mod auth;
mod entity;
mod repository;
mod validation;

pub use auth::{AuthFailure, AuthFailureReason, AuthOutcome, Principal};
pub use entity::{Account, AccountId, EmailAddress};
pub use repository::{AccountFilter, AccountRepository};
pub use validation::{
    validate_email, validate_password, validate_role, AccountValidationError,
};

#[cfg(test)]
pub use repository::mock::MockAccountRepository;
