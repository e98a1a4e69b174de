//! Storefront tenants library.
//!
//! The tenant endpoint (fetch, create, owner-authorized update) as a library,
//! so it can be tested against in-memory collaborators and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod session;
pub mod state;
pub mod store;
