//! Common identifier types

use serde::{Deserialize, Serialize};

/// Identifier of a land plot.
///
/// Assigned locally as `max(existing) + 1` and preserved verbatim when rows
/// are pushed to the backing store, so the local and remote identifier spaces
/// are the same.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct PlotId(pub i64);

impl PlotId {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Delegate so width and alignment flags apply to the number.
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for PlotId {
    fn from(id: i64) -> Self {
        PlotId(id)
    }
}
