//! Database migration command.
//!
//! Migrations live in `crates/tenants/migrations/` and are embedded at
//! compile time.

use super::{CommandError, connect};

/// Run tenant database migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running tenant migrations...");
    sqlx::migrate!("../tenants/migrations").run(&pool).await?;

    tracing::info!("Tenant migrations complete!");
    Ok(())
}
