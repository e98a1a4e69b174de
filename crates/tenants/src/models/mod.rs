//! Domain models for tenants.

pub mod tenant;

pub use tenant::{ClientTenant, ServerTenant, TenantDraft, TenantPatch};
