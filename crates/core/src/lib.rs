//! Storefront Tenants Core - Shared types library.
//!
//! This crate provides the types shared by the tenants service components:
//! - `tenants` - The tenant HTTP endpoint
//! - `cli` - Command-line tools for migrations and tenant inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for tenant IDs, slugs, emails, and tiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
