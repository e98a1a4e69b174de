//! Tenant inspection commands.

use storefront_tenants::db::{RepositoryError, TenantRepository};
use storefront_tenants_core::Slug;

use super::{CommandError, connect};

/// Print the server view of a tenant as pretty JSON.
pub async fn show(slug: &str) -> Result<(), CommandError> {
    let slug = Slug::parse(slug).map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
    let pool = connect().await?;

    let tenant = TenantRepository::new(&pool)
        .get_by_slug(&slug)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&tenant)?);
    }
    Ok(())
}
