//! The diff engine: pure functions deciding what is missing remotely
//!
//! Plots match on their identifier; operations match on the natural key
//! (plot, date, weight, loss). Local identifiers are preserved as-is and
//! queue order follows local insertion order, so a partial write failure
//! damages a deterministic prefix or suffix rather than an arbitrary subset.

use std::collections::{BTreeMap, HashSet};

use shared::{Operation, OperationKey, Plot, PlotId};

/// Local plots whose identifier is absent remotely, ascending by id
pub fn diff_plots<'a>(
    local: &'a BTreeMap<PlotId, Plot>,
    remote_ids: &HashSet<PlotId>,
) -> Vec<&'a Plot> {
    local
        .values()
        .filter(|plot| !remote_ids.contains(&plot.id))
        .collect()
}

/// A local operation excluded from the queue because its plot is not remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOperation {
    pub id: i64,
    pub plot_id: PlotId,
}

/// Outcome of diffing local operations against the remote state
#[derive(Debug, Default)]
pub struct OperationDiff<'a> {
    /// Queue of operations to insert, in local insertion order
    pub to_insert: Vec<&'a Operation>,
    /// Operations gated out because their plot is absent remotely
    pub skipped: Vec<SkippedOperation>,
}

/// Diff local operations against the remote natural-key set.
///
/// `remote_plot_ids` must already include plot ids queued for insertion in
/// the current pass; an operation whose plot is in neither place is skipped,
/// never queued. Queued entries are not deduplicated against each other:
/// two local records sharing a natural key are both queued while neither is
/// remote, and both stop matching as missing once the key exists remotely.
pub fn diff_operations<'a>(
    local: &'a [Operation],
    remote_keys: &HashSet<OperationKey>,
    remote_plot_ids: &HashSet<PlotId>,
) -> OperationDiff<'a> {
    let mut diff = OperationDiff::default();
    for op in local {
        if !remote_plot_ids.contains(&op.plot_id) {
            diff.skipped.push(SkippedOperation {
                id: op.id,
                plot_id: op.plot_id,
            });
            continue;
        }
        if !remote_keys.contains(&op.natural_key()) {
            diff.to_insert.push(op);
        }
    }
    diff
}
