//! Batched inserts with per-record failure isolation
//!
//! One transaction per batch; each row runs inside a savepoint so a failed
//! insert rolls back alone and the rest of the queue is still attempted. The
//! single commit at the end makes every successful row durable.

use sqlx::{Acquire, PgPool, Postgres, Transaction};

use shared::{Operation, Plot};

/// Per-batch outcome counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub inserted: usize,
    pub failed: usize,
}

impl WriteReport {
    /// A batch whose transaction never opened: nothing was attempted, the
    /// whole queue counts as failed.
    pub fn batch_not_opened(queue_len: usize) -> Self {
        Self {
            inserted: 0,
            failed: queue_len,
        }
    }

    /// Fold one row outcome into the counters. A failed row only increments
    /// `failed`; the rows after it are still attempted and counted.
    pub fn record<E>(&mut self, outcome: &Result<(), E>) {
        match outcome {
            Ok(()) => self.inserted += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Insert queued plots, preserving their local identifiers.
///
/// A failure to open the batch transaction aborts the whole batch; a failure
/// on one row is reported and does not stop its siblings.
pub async fn write_plots(pool: &PgPool, queue: &[&Plot]) -> WriteReport {
    let mut report = WriteReport::default();
    if queue.is_empty() {
        return report;
    }

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            println!("[db] Error opening plot batch: {e}");
            return WriteReport::batch_not_opened(queue.len());
        }
    };

    for plot in queue {
        let outcome = insert_plot(&mut tx, plot).await;
        match &outcome {
            Ok(()) => println!("Plot '{}' (ID {}) inserted.", plot.name, plot.id),
            Err(e) => {
                println!("Failed to insert plot '{}' (ID {}): {e}", plot.name, plot.id)
            }
        }
        report.record(&outcome);
    }

    if let Err(e) = tx.commit().await {
        println!("[db] Error committing plot batch: {e}");
    }
    report
}

/// Insert queued operations; op_id is assigned by the store.
pub async fn write_operations(pool: &PgPool, queue: &[&Operation]) -> WriteReport {
    let mut report = WriteReport::default();
    if queue.is_empty() {
        return report;
    }

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            println!("[db] Error opening operation batch: {e}");
            return WriteReport::batch_not_opened(queue.len());
        }
    };

    for op in queue {
        let outcome = insert_operation(&mut tx, op).await;
        match &outcome {
            Ok(()) => println!("Operation {} (plot {}) inserted.", op.id, op.plot_id),
            Err(e) => println!("Failed to insert operation {}: {e}", op.id),
        }
        report.record(&outcome);
    }

    if let Err(e) = tx.commit().await {
        println!("[db] Error committing operation batch: {e}");
    }
    report
}

async fn insert_plot(
    tx: &mut Transaction<'_, Postgres>,
    plot: &Plot,
) -> Result<(), sqlx::Error> {
    // Nested transaction = savepoint; dropping it on error rolls back this
    // row only.
    let mut sp = tx.begin().await?;
    sqlx::query("INSERT INTO plots (id, name, area_ha) VALUES ($1, $2, $3)")
        .bind(plot.id.as_i64())
        .bind(&plot.name)
        .bind(plot.area_ha)
        .execute(&mut *sp)
        .await?;
    sp.commit().await
}

async fn insert_operation(
    tx: &mut Transaction<'_, Postgres>,
    op: &Operation,
) -> Result<(), sqlx::Error> {
    let mut sp = tx.begin().await?;
    sqlx::query(
        "INSERT INTO operations (plot_id, op_date, weight_t, loss_pct) VALUES ($1, $2, $3, $4)",
    )
    .bind(op.plot_id.as_i64())
    .bind(op.date)
    .bind(op.weight_t)
    .bind(op.loss_pct)
    .execute(&mut *sp)
    .await?;
    sp.commit().await
}
