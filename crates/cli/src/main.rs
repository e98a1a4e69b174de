//! Storefront tenants CLI - Database migrations and tenant inspection.
//!
//! # Usage
//!
//! ```bash
//! # Run tenant database migrations
//! tenants-cli migrate
//!
//! # Print the full record of a tenant
//! tenants-cli tenant show tienda-sol
//! ```
//!
//! # Environment Variables
//!
//! - `TENANTS_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tenants-cli")]
#[command(author, version, about = "Storefront tenants CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect tenants
    Tenant {
        #[command(subcommand)]
        action: TenantAction,
    },
}

#[derive(Subcommand)]
enum TenantAction {
    /// Print the full record of a tenant as JSON
    Show {
        /// Tenant slug
        slug: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Tenant { action } => match action {
            TenantAction::Show { slug } => commands::tenant::show(&slug).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tenant_show() {
        let cli = Cli::try_parse_from(["tenants-cli", "tenant", "show", "tienda-sol"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Tenant {
                action: TenantAction::Show { slug }
            }) if slug == "tienda-sol"
        ));
    }
}
