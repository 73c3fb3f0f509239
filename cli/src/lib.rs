//! Harvest management CLI library
//!
//! The binary in `main.rs` is a thin wrapper; everything testable lives here.

pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod report;
pub mod services;
pub mod store;

pub use config::Config;
