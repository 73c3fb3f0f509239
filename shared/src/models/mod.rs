//! Domain models for the harvest management system

mod operation;
mod plot;

pub use operation::*;
pub use plot::*;
