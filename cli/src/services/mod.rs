//! Sync engine services
//!
//! Dependency order, leaves first: reconcile (pure) → connection → schema and
//! remote (need a pool) → writer → sync (orchestration).

pub mod connection;
pub mod reconcile;
pub mod remote;
pub mod schema;
pub mod sync;
pub mod writer;
