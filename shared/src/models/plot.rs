//! Land plot models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::PlotId;

/// A unit of cultivated land
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plot {
    pub id: PlotId,
    pub name: String,
    /// Area in hectares
    pub area_ha: Decimal,
}

impl Plot {
    /// Create a new plot.
    /// Returns None when the name is empty or the area is not positive.
    pub fn new(id: PlotId, name: impl Into<String>, area_ha: Decimal) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() || area_ha <= Decimal::ZERO {
            return None;
        }
        Some(Self { id, name, area_ha })
    }
}
