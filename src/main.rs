use clap::Parser;
use hotgigs_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Admin(args) => cli::admin::run(args).await,
    }
}
