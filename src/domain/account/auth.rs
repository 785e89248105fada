//! Authentication outcome types
//!
//! Rejection reasons exist for internal diagnostics only. The HTTP layer
//! maps every rejection to one indistinguishable invalid-credentials
//! response; reasons must never reach an unauthenticated caller.

use serde::Serialize;

use super::entity::{Account, AccountId, EmailAddress};

/// Authenticated identity returned after successful verification
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub id: AccountId,
    pub email: EmailAddress,
    pub role: String,
    pub is_admin: bool,
}

impl Principal {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id(),
            email: account.email().clone(),
            role: account.role().to_string(),
            is_admin: account.is_admin(),
        }
    }
}

/// Internal reason an authentication attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureReason {
    /// No account exists for the email
    NotFound,
    /// Account exists but has no password hash (identity-provider account)
    NoPassword,
    /// Password did not verify against the stored hash
    Mismatch,
    /// Credentials correct but the account is deactivated
    Inactive,
}

impl AuthFailureReason {
    /// Diagnostic label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::NoPassword => "no_password",
            Self::Mismatch => "mismatch",
            Self::Inactive => "inactive",
        }
    }
}

/// A rejected authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFailure {
    pub reason: AuthFailureReason,
}

impl AuthFailure {
    pub fn new(reason: AuthFailureReason) -> Self {
        Self { reason }
    }
}

/// Result of a single authentication attempt
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Authenticated(Principal),
    Rejected(AuthFailure),
}

impl AuthOutcome {
    pub fn rejected(reason: AuthFailureReason) -> Self {
        Self::Rejected(AuthFailure::new(reason))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Extract the principal, discarding the rejection reason
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_from_account() {
        let mut account = Account::new(
            EmailAddress::new("admin@hotgigs.ai").unwrap(),
            Some("hash".to_string()),
            "company",
        );
        account.set_admin(true);

        let principal = Principal::from_account(&account);
        assert_eq!(principal.id, account.id());
        assert_eq!(principal.email.as_str(), "admin@hotgigs.ai");
        assert_eq!(principal.role, "company");
        assert!(principal.is_admin);
    }

    #[test]
    fn test_outcome_helpers() {
        let rejected = AuthOutcome::rejected(AuthFailureReason::Mismatch);
        assert!(!rejected.is_authenticated());
        assert!(rejected.into_principal().is_none());
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(AuthFailureReason::NotFound.as_str(), "not_found");
        assert_eq!(AuthFailureReason::NoPassword.as_str(), "no_password");
        assert_eq!(AuthFailureReason::Mismatch.as_str(), "mismatch");
        assert_eq!(AuthFailureReason::Inactive.as_str(), "inactive");
    }
}
