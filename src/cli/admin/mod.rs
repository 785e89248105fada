//! Admin command - operator tasks against the hosted store

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use serde_json::json;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::account::{Account, AccountRepository, AuthOutcome, EmailAddress};
use crate::infrastructure::account::{
    AccountService, AccountServiceTrait, Argon2Hasher, ProvisionRequest, StoreAccountRepository,
};
use crate::infrastructure::logging;
use crate::infrastructure::store::TableClient;

#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Idempotently provision an administrator account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Role value to request; falls back to a sampled role if the
        /// store rejects it
        #[arg(long, default_value = "admin")]
        role: String,
    },

    /// Check a password against the stored credentials
    VerifyPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sample role values accepted by the store
    Roles,

    /// Verify store connectivity and write access with an ephemeral row
    Probe,

    /// Run a SQL file against the store, statement by statement
    ApplySchema {
        #[arg(long)]
        file: PathBuf,
    },
}

/// Run an admin subcommand
pub async fn run(args: AdminArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let client = TableClient::new(&config.store)?;
    let repository = Arc::new(StoreAccountRepository::new(client.clone()));
    let service = AccountService::new(repository.clone(), Arc::new(Argon2Hasher::new()));

    match args.command {
        AdminCommand::CreateAdmin {
            email,
            password,
            role,
        } => create_admin(&service, email, password, role).await,
        AdminCommand::VerifyPassword { email, password } => {
            verify_password(&service, email, password).await
        }
        AdminCommand::Roles => list_roles(&service).await,
        AdminCommand::Probe => probe(repository.as_ref()).await,
        AdminCommand::ApplySchema { file } => apply_schema(&client, file).await,
    }
}

async fn create_admin(
    service: &impl AccountServiceTrait,
    email: String,
    password: String,
    role: String,
) -> anyhow::Result<()> {
    let provisioned = service
        .ensure_account_with_role_fallback(ProvisionRequest {
            email,
            password,
            role,
            is_admin: true,
        })
        .await?;

    let account = &provisioned.account;
    if provisioned.created {
        info!(email = %account.email(), role = %account.role(), "admin account created");
    } else {
        info!(email = %account.email(), "admin account already exists, left unchanged");
    }
    if let Some(fallback) = &provisioned.fallback_role {
        warn!(role = %fallback, "requested role was rejected by the store; used sampled role");
    }

    println!("id: {}", account.id());
    println!("email: {}", account.email());
    println!("role: {}", account.role());
    println!("is_admin: {}", account.is_admin());
    println!("created: {}", provisioned.created);

    Ok(())
}

async fn verify_password(
    service: &impl AccountServiceTrait,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    match service.authenticate(&email, &password).await? {
        AuthOutcome::Authenticated(principal) => {
            println!("OK: credentials valid for {} (role: {})", principal.email, principal.role);
            Ok(())
        }
        AuthOutcome::Rejected(failure) => {
            // Operator diagnostics; never exposed over HTTP.
            println!("REJECTED: {}", failure.reason.as_str());
            std::process::exit(1);
        }
    }
}

async fn list_roles(service: &impl AccountServiceTrait) -> anyhow::Result<()> {
    let roles = service.discover_roles().await?;

    if roles.is_empty() {
        println!("No accounts to sample roles from.");
    } else {
        println!("Observed role values:");
        for role in roles {
            println!("  {}", role);
        }
    }

    Ok(())
}

/// Insert and delete a throwaway account row to prove the service key
/// has write access.
async fn probe(repository: &StoreAccountRepository) -> anyhow::Result<()> {
    let email = EmailAddress::new(format!("probe-{}@hotgigs.internal", uuid::Uuid::new_v4()))
        .map_err(|e| anyhow::anyhow!("probe email: {}", e))?;
    let account = Account::new(email, None, "candidate");
    let id = account.id();

    let inserted = repository.insert(account).await?;

    // The row must not outlive the check; if cleanup fails the
    // operator needs the id to remove it by hand.
    if let Err(e) = repository.delete(inserted.id()).await {
        warn!(id = %inserted.id(), "ephemeral row could not be deleted");
        eprintln!(
            "WARNING: ephemeral account row {} was left behind; delete it manually",
            inserted.id()
        );
        return Err(anyhow::anyhow!("cleanup of ephemeral row {} failed: {}", inserted.id(), e));
    }

    println!("OK: store reachable, write access confirmed (ephemeral id {})", id);
    Ok(())
}

async fn apply_schema(client: &TableClient, file: PathBuf) -> anyhow::Result<()> {
    let sql = std::fs::read_to_string(&file)?;

    let statements: Vec<&str> = sql
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    info!(file = %file.display(), count = statements.len(), "applying schema statements");

    for (index, statement) in statements.iter().enumerate() {
        client
            .rpc("exec_sql", &json!({ "sql": statement }))
            .await
            .map_err(|e| anyhow::anyhow!("statement {} failed: {}", index + 1, e))?;
    }

    println!("Applied {} statements from {}", statements.len(), file.display());
    Ok(())
}
