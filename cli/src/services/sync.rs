//! Sync orchestration: push local records absent remotely into the store
//!
//! Plots are fully diffed and written before operations are diffed, so an
//! operation is only queued once its plot is known remotely, pre-existing or
//! inserted this same pass. Nothing here terminates the process; every
//! failure is reported and the menu survives.

use std::collections::HashSet;

use shared::{OperationKey, PlotId};

use crate::services::{connection::ConnectionManager, reconcile, remote, schema, writer};
use crate::store::WorkingSet;

/// Run one full sync of the working set against the backing store
pub async fn run_sync(working_set: &WorkingSet, manager: &mut ConnectionManager) {
    let pool = match manager.ensure_ready().await {
        Ok(pool) => pool,
        Err(e) => {
            println!("Sync aborted: {e}");
            return;
        }
    };

    schema::ensure_schema(&pool).await;

    println!("\nSyncing plots...");
    let remote_plots = remote::list_remote_plots(&pool).await;
    let mut known_plot_ids: HashSet<PlotId> =
        remote_plots.iter().map(|plot| plot.plot_id()).collect();

    let plot_queue = reconcile::diff_plots(&working_set.plots, &known_plot_ids);
    if plot_queue.is_empty() {
        println!("No new plots to sync.");
    } else {
        tracing::info!(count = plot_queue.len(), "inserting plots");
        let report = writer::write_plots(&pool, &plot_queue).await;
        println!("Plots: {} inserted, {} failed.", report.inserted, report.failed);
    }

    // Plot ids queued this pass gate the operation phase.
    known_plot_ids.extend(plot_queue.iter().map(|plot| plot.id));

    println!("\nSyncing operations...");
    let remote_ops = remote::list_remote_operations(&pool).await;
    let remote_keys: HashSet<OperationKey> =
        remote_ops.iter().map(|op| op.natural_key()).collect();

    let diff = reconcile::diff_operations(&working_set.operations, &remote_keys, &known_plot_ids);
    for skip in &diff.skipped {
        println!(
            "Operation {} skipped: plot {} does not exist remotely.",
            skip.id, skip.plot_id
        );
    }
    if diff.to_insert.is_empty() {
        println!("No new operations to sync.");
    } else {
        tracing::info!(count = diff.to_insert.len(), "inserting operations");
        let report = writer::write_operations(&pool, &diff.to_insert).await;
        println!(
            "Operations: {} inserted, {} failed.",
            report.inserted, report.failed
        );
    }

    pool.close().await;
    println!("\nSync finished.");
}
