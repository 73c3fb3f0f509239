//! Plain-text harvest report export

use std::path::Path;

use rust_decimal::Decimal;

use crate::error::AppResult;
use crate::store::WorkingSet;

/// Aggregates shown at the top of the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_operations: usize,
    pub total_weight_t: Decimal,
    pub mean_loss_pct: Decimal,
}

/// Compute the report aggregates over the working set
pub fn summarize(working_set: &WorkingSet) -> ReportSummary {
    let total_operations = working_set.operations.len();
    let total_weight_t: Decimal = working_set.operations.iter().map(|op| op.weight_t).sum();
    let mean_loss_pct = if total_operations == 0 {
        Decimal::ZERO
    } else {
        let total_loss: Decimal = working_set.operations.iter().map(|op| op.loss_pct).sum();
        total_loss / Decimal::from(total_operations as i64)
    };
    ReportSummary {
        total_operations,
        total_weight_t,
        mean_loss_pct,
    }
}

/// Render the full report text
pub fn render(working_set: &WorkingSet) -> String {
    let summary = summarize(working_set);
    let mut out = String::new();

    out.push_str("HARVEST REPORT\n");
    out.push_str(&format!("Date: {}\n\n", chrono::Local::now()));
    out.push_str(&format!("Total operations: {}\n", summary.total_operations));
    out.push_str(&format!(
        "Total harvested weight (t): {:.2}\n",
        summary.total_weight_t
    ));
    out.push_str(&format!(
        "Mean estimated loss (%): {:.2}\n\n",
        summary.mean_loss_pct
    ));
    out.push_str("Operations:\n");
    for op in &working_set.operations {
        let plot_name = working_set.plot_name(op.plot_id).unwrap_or("?");
        out.push_str(&format!(
            "- {} | Plot {} ({}) | Weight {} t | Loss {}%\n",
            op.date, op.plot_id, plot_name, op.weight_t, op.loss_pct
        ));
    }
    out
}

/// Write the report to a file
pub fn export(working_set: &WorkingSet, path: &Path) -> AppResult<()> {
    std::fs::write(path, render(working_set))?;
    Ok(())
}
