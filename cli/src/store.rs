//! Local working set: in-memory plots and operations, persisted as JSON
//!
//! The sync engine only reads this; mutation happens through the menu actions.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::{Operation, Plot, PlotId};

use crate::error::{AppError, AppResult};

/// The in-memory record set for one operator session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingSet {
    pub plots: BTreeMap<PlotId, Plot>,
    pub operations: Vec<Operation>,
}

impl WorkingSet {
    /// Next plot identifier: max(existing) + 1, or 1 when empty
    pub fn next_plot_id(&self) -> PlotId {
        let max = self.plots.keys().map(|id| id.as_i64()).max().unwrap_or(0);
        PlotId(max + 1)
    }

    /// Next operation identifier: sequential within the session
    pub fn next_operation_id(&self) -> i64 {
        self.operations.len() as i64 + 1
    }

    /// Register a new plot, assigning its identifier
    pub fn add_plot(&mut self, name: impl Into<String>, area_ha: Decimal) -> AppResult<PlotId> {
        let id = self.next_plot_id();
        let plot = Plot::new(id, name, area_ha).ok_or(AppError::Validation {
            field: "plot".to_string(),
            message: "Plot needs a non-empty name and a positive area".to_string(),
        })?;
        self.plots.insert(id, plot);
        Ok(id)
    }

    /// Record a harvest operation against an existing plot.
    /// The loss alert is computed here, once, and stored with the record.
    pub fn record_operation(
        &mut self,
        plot_id: PlotId,
        date: NaiveDate,
        weight_t: Decimal,
        loss_pct: Decimal,
    ) -> AppResult<Operation> {
        if !self.plots.contains_key(&plot_id) {
            return Err(AppError::NotFound(format!("plot {plot_id}")));
        }
        let op = Operation::new(self.next_operation_id(), plot_id, date, weight_t, loss_pct)
            .ok_or(AppError::Validation {
                field: "operation".to_string(),
                message: "Weight must be non-negative and loss within 0-100".to_string(),
            })?;
        self.operations.push(op.clone());
        Ok(op)
    }

    /// Plot name lookup for display purposes
    pub fn plot_name(&self, id: PlotId) -> Option<&str> {
        self.plots.get(&id).map(|p| p.name.as_str())
    }

    /// Load the working set from a JSON file.
    /// A missing file is an empty set; a malformed file is an error.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save the working set to a JSON file (pretty-printed)
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
