//! Harvest operation models and the loss alert classifier

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::PlotId;

/// A recorded harvest event against a plot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    pub id: i64,
    pub plot_id: PlotId,
    pub date: NaiveDate,
    /// Harvested weight in tonnes
    pub weight_t: Decimal,
    /// Estimated loss percentage (0-100)
    pub loss_pct: Decimal,
    /// Severity band derived from `loss_pct` at creation time.
    /// Local-only: never written to the backing store.
    pub alert: LossAlert,
}

impl Operation {
    /// Create a new operation; the alert band is computed once here.
    /// Returns None when the weight is negative or the loss is outside [0, 100].
    pub fn new(
        id: i64,
        plot_id: PlotId,
        date: NaiveDate,
        weight_t: Decimal,
        loss_pct: Decimal,
    ) -> Option<Self> {
        if weight_t < Decimal::ZERO || loss_pct < Decimal::ZERO || loss_pct > dec!(100) {
            return None;
        }
        Some(Self {
            id,
            plot_id,
            date,
            weight_t,
            loss_pct,
            alert: LossAlert::classify(loss_pct),
        })
    }

    /// The natural key used to match local operations against remote rows.
    ///
    /// Two operations agreeing on all four fields are the same entity to the
    /// reconciler, even when they were recorded separately.
    pub fn natural_key(&self) -> OperationKey {
        OperationKey {
            plot_id: self.plot_id,
            date: self.date,
            weight_t: self.weight_t,
            loss_pct: self.loss_pct,
        }
    }
}

/// Natural-key identity of an operation: (plot, date, weight, loss)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub plot_id: PlotId,
    pub date: NaiveDate,
    pub weight_t: Decimal,
    pub loss_pct: Decimal,
}

/// Severity band for estimated harvest loss
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LossAlert {
    Low,
    Medium,
    High,
}

impl LossAlert {
    /// Map a loss percentage to its severity band.
    ///
    /// Total over any decimal input; callers clamp to [0, 100] at entry.
    pub fn classify(loss_pct: Decimal) -> Self {
        if loss_pct >= dec!(15) {
            LossAlert::High
        } else if loss_pct >= dec!(8) {
            LossAlert::Medium
        } else {
            LossAlert::Low
        }
    }

    /// Short band label
    pub fn label(&self) -> &'static str {
        match self {
            LossAlert::Low => "LOW",
            LossAlert::Medium => "MEDIUM",
            LossAlert::High => "HIGH",
        }
    }

    /// Remediation guidance shown to the operator
    pub fn remediation(&self) -> &'static str {
        match self {
            LossAlert::Low => "within expected range",
            LossAlert::Medium => "review field moisture and terrain, check blades",
            LossAlert::High => {
                "investigate harvester calibration, ground speed and cutting height"
            }
        }
    }
}

impl std::fmt::Display for LossAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.remediation())
    }
}
