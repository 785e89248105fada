//! Account service: registration, provisioning, and authentication

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::account::{
    validate_password, validate_role, Account, AccountFilter, AccountId, AccountRepository,
    AuthFailureReason, AuthOutcome, EmailAddress, Principal,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// How many account rows to sample when discovering role values
const ROLE_SAMPLE_LIMIT: usize = 50;

/// Request for self-service registration
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request for idempotent provisioning of a well-known account
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_admin: bool,
}

/// Outcome of a provisioning call
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub account: Account,
    /// True when this call created the account, false when it already
    /// existed and was returned unchanged
    pub created: bool,
    /// Set when the requested role was rejected and a sampled role was
    /// used instead
    pub fallback_role: Option<String>,
}

/// Trait for account service operations (used by handlers and the CLI)
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<Account, DomainError>;

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, DomainError>;

    async fn ensure_account(&self, request: ProvisionRequest)
        -> Result<Provisioned, DomainError>;

    /// Ensure a password-less account exists for an identity-provider
    /// sign-in
    async fn ensure_identity_account(
        &self,
        email: &str,
        role: &str,
    ) -> Result<Account, DomainError>;

    async fn ensure_account_with_role_fallback(
        &self,
        request: ProvisionRequest,
    ) -> Result<Provisioned, DomainError>;

    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn discover_roles(&self) -> Result<Vec<String>, DomainError>;
}

/// Account service over a repository and a password hasher
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: AccountRepository, H: PasswordHasher> AccountService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    fn parse_email(email: &str) -> Result<EmailAddress, DomainError> {
        EmailAddress::new(email).map_err(|e| DomainError::validation(e.to_string()))
    }
}

#[async_trait]
impl<R: AccountRepository, H: PasswordHasher> AccountServiceTrait for AccountService<R, H> {
    /// Register a new account with a hashed password
    async fn register(&self, request: RegisterRequest) -> Result<Account, DomainError> {
        let email = Self::parse_email(&request.email)?;

        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_role(&request.role).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let account = Account::new(email, Some(password_hash), request.role);

        self.repository.insert(account).await
    }

    /// Authenticate an email/password pair.
    ///
    /// Every rejection path performs a hash verification (real or
    /// dummy) before returning, so response timing does not reveal
    /// whether the account exists or is active.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, DomainError> {
        let email = match EmailAddress::new(email) {
            Ok(email) => email,
            Err(_) => {
                self.hasher.dummy_verify(password);
                return Ok(AuthOutcome::rejected(AuthFailureReason::NotFound));
            }
        };

        let account = match self.repository.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                self.hasher.dummy_verify(password);
                debug!(email = %email, reason = "not_found", "authentication rejected");
                return Ok(AuthOutcome::rejected(AuthFailureReason::NotFound));
            }
        };

        let hash = match account.password_hash() {
            Some(hash) => hash,
            None => {
                self.hasher.dummy_verify(password);
                debug!(email = %email, reason = "no_password", "authentication rejected");
                return Ok(AuthOutcome::rejected(AuthFailureReason::NoPassword));
            }
        };

        // Verification runs before the active check on purpose.
        if !self.hasher.verify(password, hash) {
            debug!(email = %email, reason = "mismatch", "authentication rejected");
            return Ok(AuthOutcome::rejected(AuthFailureReason::Mismatch));
        }

        if !account.is_active() {
            debug!(email = %email, reason = "inactive", "authentication rejected");
            return Ok(AuthOutcome::rejected(AuthFailureReason::Inactive));
        }

        Ok(AuthOutcome::Authenticated(Principal::from_account(&account)))
    }

    /// Ensure exactly one account exists for the email.
    ///
    /// An existing account is returned unchanged: password, role, and
    /// flags are never overwritten, so re-running provisioning is
    /// always safe. A `Conflict` from the store (concurrent
    /// provisioning) resolves to the record the other writer created.
    async fn ensure_account(
        &self,
        request: ProvisionRequest,
    ) -> Result<Provisioned, DomainError> {
        let email = Self::parse_email(&request.email)?;

        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_role(&request.role).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(existing) = self.repository.find_by_email(&email).await? {
            debug!(email = %email, "account already provisioned");
            return Ok(Provisioned {
                account: existing,
                created: false,
                fallback_role: None,
            });
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let mut account = Account::new(email.clone(), Some(password_hash), &request.role);
        account.mark_verified();
        account.set_admin(request.is_admin);

        match self.repository.insert(account).await {
            Ok(account) => {
                info!(email = %email, role = %request.role, "provisioned account");
                Ok(Provisioned {
                    account,
                    created: true,
                    fallback_role: None,
                })
            }
            Err(DomainError::Conflict { .. }) => {
                // Lost the race against a concurrent provisioner; the
                // store's unique constraint is authoritative.
                debug!(email = %email, "concurrent provisioning detected, re-fetching");
                let existing = self.repository.find_by_email(&email).await?.ok_or_else(|| {
                    DomainError::internal(format!(
                        "Insert for '{}' conflicted but no account found on re-fetch",
                        email
                    ))
                })?;

                Ok(Provisioned {
                    account: existing,
                    created: false,
                    fallback_role: None,
                })
            }
            Err(DomainError::Validation { message }) => {
                // The role enumeration is owned by the store schema and
                // cannot be introspected directly; sampling existing
                // rows is a workaround, not a contract.
                let observed = self.discover_roles().await.unwrap_or_default();
                Err(DomainError::validation(format!(
                    "{} (observed role values: {:?})",
                    message, observed
                )))
            }
            Err(e) => Err(e),
        }
    }

    /// Ensure a password-less account for an identity-provider email.
    ///
    /// The caller has already verified the external identity; no hash
    /// is stored, so password login stays impossible for the account.
    async fn ensure_identity_account(
        &self,
        email: &str,
        role: &str,
    ) -> Result<Account, DomainError> {
        let email = Self::parse_email(email)?;
        validate_role(role).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(existing) = self.repository.find_by_email(&email).await? {
            return Ok(existing);
        }

        let mut account = Account::new(email.clone(), None, role);
        account.mark_verified();

        match self.repository.insert(account).await {
            Ok(account) => {
                info!(email = %email, "provisioned identity-provider account");
                Ok(account)
            }
            Err(DomainError::Conflict { .. }) => {
                self.repository.find_by_email(&email).await?.ok_or_else(|| {
                    DomainError::internal(format!(
                        "Insert for '{}' conflicted but no account found on re-fetch",
                        email
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Provision, retrying once with a sampled role when the store
    /// rejects the requested one.
    async fn ensure_account_with_role_fallback(
        &self,
        request: ProvisionRequest,
    ) -> Result<Provisioned, DomainError> {
        // Local field checks run first so that only a store-side
        // rejection of the role triggers the sampling retry.
        Self::parse_email(&request.email)?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_role(&request.role).map_err(|e| DomainError::validation(e.to_string()))?;

        let rejected_role = request.role.clone();

        match self.ensure_account(request.clone()).await {
            Err(DomainError::Validation { message }) => {
                let observed = self.discover_roles().await?;
                let fallback = observed
                    .into_iter()
                    .find(|role| *role != rejected_role)
                    .ok_or(DomainError::Validation { message })?;

                warn!(
                    rejected = %rejected_role,
                    fallback = %fallback,
                    "store rejected role, retrying with sampled value"
                );

                let mut provisioned = self
                    .ensure_account(ProvisionRequest {
                        role: fallback.clone(),
                        ..request
                    })
                    .await?;
                provisioned.fallback_role = Some(fallback);

                Ok(provisioned)
            }
            other => other,
        }
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        self.repository.get(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let email = Self::parse_email(email)?;
        self.repository.find_by_email(&email).await
    }

    /// Sample distinct role values from existing accounts.
    ///
    /// Diagnostic only; never used on an authentication path.
    async fn discover_roles(&self) -> Result<Vec<String>, DomainError> {
        let accounts = self
            .repository
            .list(AccountFilter {
                role: None,
                limit: Some(ROLE_SAMPLE_LIMIT),
            })
            .await?;

        let mut roles: Vec<String> =
            accounts.iter().map(|a| a.role().to_string()).collect();
        roles.sort();
        roles.dedup();

        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AuthFailure;
    use crate::infrastructure::account::password::Argon2Hasher;
    use crate::infrastructure::account::repository::InMemoryAccountRepository;

    fn create_service() -> AccountService<InMemoryAccountRepository, Argon2Hasher> {
        AccountService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(Argon2Hasher::new()),
        )
    }

    fn service_with_roles(
        roles: &[&str],
    ) -> AccountService<InMemoryAccountRepository, Argon2Hasher> {
        AccountService::new(
            Arc::new(InMemoryAccountRepository::with_accepted_roles(roles)),
            Arc::new(Argon2Hasher::new()),
        )
    }

    fn provision_request(email: &str, role: &str) -> ProvisionRequest {
        ProvisionRequest {
            email: email.to_string(),
            password: "admin123".to_string(),
            role: role.to_string(),
            is_admin: true,
        }
    }

    fn rejection_reason(outcome: AuthOutcome) -> AuthFailureReason {
        match outcome {
            AuthOutcome::Rejected(AuthFailure { reason }) => reason,
            AuthOutcome::Authenticated(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let service = create_service();

        let account = service
            .register(RegisterRequest {
                email: "user@example.com".to_string(),
                password: "secret123".to_string(),
                role: "candidate".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(account.role(), "candidate");
        assert!(!account.is_admin());

        let outcome = service
            .authenticate("user@example.com", "secret123")
            .await
            .unwrap();
        let principal = outcome.into_principal().unwrap();
        assert_eq!(principal.email.as_str(), "user@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        let request = RegisterRequest {
            email: "user@example.com".to_string(),
            password: "secret123".to_string(),
            role: "candidate".to_string(),
        };

        service.register(request.clone()).await.unwrap();

        let result = service.register(request).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = create_service();

        service
            .register(RegisterRequest {
                email: "user@example.com".to_string(),
                password: "secret123".to_string(),
                role: "candidate".to_string(),
            })
            .await
            .unwrap();

        let outcome = service
            .authenticate("user@example.com", "wrong_password")
            .await
            .unwrap();
        assert_eq!(rejection_reason(outcome), AuthFailureReason::Mismatch);
    }

    #[tokio::test]
    async fn test_authenticate_missing_account() {
        let service = create_service();

        let outcome = service
            .authenticate("missing@x.com", "anything1")
            .await
            .unwrap();
        assert_eq!(rejection_reason(outcome), AuthFailureReason::NotFound);
    }

    #[tokio::test]
    async fn test_authenticate_inactive_account() {
        let service = create_service();

        let mut account = service
            .register(RegisterRequest {
                email: "user@example.com".to_string(),
                password: "secret123".to_string(),
                role: "candidate".to_string(),
            })
            .await
            .unwrap();

        account.deactivate();
        service.repository.update(&account).await.unwrap();

        let outcome = service
            .authenticate("user@example.com", "secret123")
            .await
            .unwrap();
        assert_eq!(rejection_reason(outcome), AuthFailureReason::Inactive);
    }

    #[tokio::test]
    async fn test_authenticate_account_without_password() {
        let service = create_service();

        // Identity-provider account: no stored hash.
        let account = Account::new(
            EmailAddress::new("oauth@example.com").unwrap(),
            None,
            "candidate",
        );
        service.repository.insert(account).await.unwrap();

        let outcome = service
            .authenticate("oauth@example.com", "anything1")
            .await
            .unwrap();
        assert_eq!(rejection_reason(outcome), AuthFailureReason::NoPassword);
    }

    #[tokio::test]
    async fn test_identity_account_has_no_password_login() {
        let service = create_service();

        let first = service
            .ensure_identity_account("oauth@example.com", "candidate")
            .await
            .unwrap();
        assert!(first.password_hash().is_none());
        assert!(first.is_verified());

        // Idempotent, and never upgraded to a password account.
        let second = service
            .ensure_identity_account("oauth@example.com", "candidate")
            .await
            .unwrap();
        assert_eq!(first.id(), second.id());

        let outcome = service
            .authenticate("oauth@example.com", "anything1")
            .await
            .unwrap();
        assert_eq!(rejection_reason(outcome), AuthFailureReason::NoPassword);
    }

    #[tokio::test]
    async fn test_ensure_account_is_idempotent() {
        let service = create_service();
        let request = provision_request("admin@hotgigs.ai", "candidate");

        let first = service.ensure_account(request.clone()).await.unwrap();
        assert!(first.created);

        let second = service.ensure_account(request).await.unwrap();
        assert!(!second.created);

        assert_eq!(first.account.id(), second.account.id());
        assert_eq!(
            first.account.password_hash(),
            second.account.password_hash()
        );
        assert_eq!(first.account.role(), second.account.role());
        assert_eq!(first.account.updated_at(), second.account.updated_at());
    }

    #[tokio::test]
    async fn test_ensure_account_does_not_overwrite_password() {
        let service = create_service();

        service
            .ensure_account(provision_request("admin@hotgigs.ai", "candidate"))
            .await
            .unwrap();

        // Re-provision with a different password; the original must win.
        service
            .ensure_account(ProvisionRequest {
                password: "different_password".to_string(),
                ..provision_request("admin@hotgigs.ai", "candidate")
            })
            .await
            .unwrap();

        let outcome = service
            .authenticate("admin@hotgigs.ai", "admin123")
            .await
            .unwrap();
        assert!(outcome.is_authenticated());
    }

    #[tokio::test]
    async fn test_ensure_account_sets_provisioning_flags() {
        let service = create_service();

        let provisioned = service
            .ensure_account(provision_request("admin@hotgigs.ai", "candidate"))
            .await
            .unwrap();

        assert!(provisioned.account.is_active());
        assert!(provisioned.account.is_verified());
        assert!(provisioned.account.is_admin());
    }

    #[tokio::test]
    async fn test_ensure_account_rejected_role_reports_observed_values() {
        let service = service_with_roles(&["candidate", "company"]);

        service
            .ensure_account(ProvisionRequest {
                is_admin: false,
                ..provision_request("hr@acme.com", "company")
            })
            .await
            .unwrap();

        let result = service
            .ensure_account(provision_request("admin@hotgigs.ai", "admin"))
            .await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert!(message.contains("company"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_role_fallback_provisions_admin() {
        let service = service_with_roles(&["candidate", "company"]);

        service
            .ensure_account(ProvisionRequest {
                is_admin: false,
                ..provision_request("hr@acme.com", "company")
            })
            .await
            .unwrap();

        let provisioned = service
            .ensure_account_with_role_fallback(provision_request("admin@hotgigs.ai", "admin"))
            .await
            .unwrap();

        assert!(provisioned.created);
        assert_eq!(provisioned.fallback_role.as_deref(), Some("company"));
        assert_eq!(provisioned.account.role(), "company");
        assert!(provisioned.account.is_admin());

        let outcome = service
            .authenticate("admin@hotgigs.ai", "admin123")
            .await
            .unwrap();
        let principal = outcome.into_principal().unwrap();
        assert_eq!(principal.role, "company");
        assert!(principal.is_admin);
    }

    #[tokio::test]
    async fn test_role_fallback_without_observable_roles_fails() {
        let service = service_with_roles(&["candidate", "company"]);

        // No existing accounts to sample from.
        let result = service
            .ensure_account_with_role_fallback(provision_request("admin@hotgigs.ai", "admin"))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_role_fallback_skips_sampling_for_local_validation() {
        use std::sync::atomic::{AtomicBool, Ordering};

        /// Repository whose `list` poisons the test if the service
        /// samples roles for a request that never reached the store.
        #[derive(Debug)]
        struct NoSampleRepository {
            inner: InMemoryAccountRepository,
            listed: AtomicBool,
        }

        #[async_trait]
        impl AccountRepository for NoSampleRepository {
            async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
                self.inner.get(id).await
            }

            async fn find_by_email(
                &self,
                email: &EmailAddress,
            ) -> Result<Option<Account>, DomainError> {
                self.inner.find_by_email(email).await
            }

            async fn insert(&self, account: Account) -> Result<Account, DomainError> {
                self.inner.insert(account).await
            }

            async fn update(&self, account: &Account) -> Result<Account, DomainError> {
                self.inner.update(account).await
            }

            async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
                self.inner.delete(id).await
            }

            async fn list(&self, filter: AccountFilter) -> Result<Vec<Account>, DomainError> {
                self.listed.store(true, Ordering::SeqCst);
                self.inner.list(filter).await
            }
        }

        let repository = Arc::new(NoSampleRepository {
            inner: InMemoryAccountRepository::new(),
            listed: AtomicBool::new(false),
        });
        let service = AccountService::new(repository.clone(), Arc::new(Argon2Hasher::new()));

        // Too-short password fails locally, without any role sampling.
        let result = service
            .ensure_account_with_role_fallback(ProvisionRequest {
                password: "short".to_string(),
                ..provision_request("admin@hotgigs.ai", "admin")
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(!repository.listed.load(Ordering::SeqCst));

        // Same for a malformed email.
        let result = service
            .ensure_account_with_role_fallback(ProvisionRequest {
                email: "not-an-email".to_string(),
                ..provision_request("admin@hotgigs.ai", "admin")
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(!repository.listed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_discover_roles_distinct_sorted() {
        let service = create_service();

        for (email, role) in [
            ("a@example.com", "company"),
            ("b@example.com", "candidate"),
            ("c@example.com", "company"),
        ] {
            service
                .ensure_account(ProvisionRequest {
                    is_admin: false,
                    ..provision_request(email, role)
                })
                .await
                .unwrap();
        }

        let roles = service.discover_roles().await.unwrap();
        assert_eq!(roles, vec!["candidate".to_string(), "company".to_string()]);
    }

    mod racing {
        use super::*;
        use std::sync::atomic::{AtomicBool, Ordering};

        /// Repository whose first lookup misses, emulating a concurrent
        /// provisioner inserting between lookup and insert.
        #[derive(Debug)]
        struct RacyRepository {
            inner: InMemoryAccountRepository,
            hide_first_lookup: AtomicBool,
        }

        #[async_trait]
        impl AccountRepository for RacyRepository {
            async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
                self.inner.get(id).await
            }

            async fn find_by_email(
                &self,
                email: &EmailAddress,
            ) -> Result<Option<Account>, DomainError> {
                if self.hide_first_lookup.swap(false, Ordering::SeqCst) {
                    return Ok(None);
                }
                self.inner.find_by_email(email).await
            }

            async fn insert(&self, account: Account) -> Result<Account, DomainError> {
                self.inner.insert(account).await
            }

            async fn update(&self, account: &Account) -> Result<Account, DomainError> {
                self.inner.update(account).await
            }

            async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
                self.inner.delete(id).await
            }

            async fn list(
                &self,
                filter: AccountFilter,
            ) -> Result<Vec<Account>, DomainError> {
                self.inner.list(filter).await
            }
        }

        #[tokio::test]
        async fn test_concurrent_provisioning_resolves_via_conflict() {
            let inner = InMemoryAccountRepository::new();
            let hasher = Arc::new(Argon2Hasher::new());

            // The "other" provisioner already inserted the account.
            let winner = AccountService::new(Arc::new(inner), hasher.clone());
            let existing = winner
                .ensure_account(provision_request("admin@hotgigs.ai", "candidate"))
                .await
                .unwrap();

            let racy = RacyRepository {
                inner: InMemoryAccountRepository::new(),
                hide_first_lookup: AtomicBool::new(true),
            };
            racy.inner.insert(existing.account.clone()).await.unwrap();

            let loser = AccountService::new(Arc::new(racy), hasher);
            let provisioned = loser
                .ensure_account(provision_request("admin@hotgigs.ai", "candidate"))
                .await
                .unwrap();

            // No duplicate-email error surfaced; the existing record won.
            assert!(!provisioned.created);
            assert_eq!(provisioned.account.id(), existing.account.id());
        }
    }
}
