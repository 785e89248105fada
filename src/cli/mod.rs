//! CLI module for the HotGigs API
//!
//! Provides subcommands for running the server and for operator tasks
//! against the hosted store:
//! - `serve`: run the HTTP API
//! - `admin`: provisioning and diagnostics

pub mod admin;
pub mod serve;

use clap::{Parser, Subcommand};

/// HotGigs API - job board backend over a hosted table store
#[derive(Parser)]
#[command(name = "hotgigs-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Operator tasks: provisioning and store diagnostics
    Admin(admin::AdminArgs),
}
