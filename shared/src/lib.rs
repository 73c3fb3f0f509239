//! Shared types and models for the harvest management system
//!
//! This crate contains the domain model used by the CLI and the sync engine:
//! plots, harvest operations, the loss alert classifier, and field validation.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
