//! Freshness gate for verified notification records
//!
//! This crate implements the single aging policy of the service:
//! - Tier table mapping verification age to SAFE / RISKY / EXPIRED
//! - Per-record evaluation with score and explanation
//! - Use-gate collapsing the three tiers into ALLOWED / BLOCKED

pub mod errors;
pub mod evaluator;
pub mod tiers;
pub mod types;

pub use errors::*;
pub use evaluator::*;
pub use tiers::*;
pub use types::*;

#[cfg(test)]
mod tests;
