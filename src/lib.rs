//! TB notification expiry service
//!
//! Exposes modules for integration testing

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod server;

pub use catalog::{load_catalog, DocumentCatalog, UseOutcome};
pub use server::{build_router, ServeState};
