//! Reads of the current remote state, as input to the diff

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::{OperationKey, PlotId};

/// A plot row as stored remotely
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RemotePlot {
    pub id: i64,
    pub name: String,
    pub area_ha: Decimal,
}

impl RemotePlot {
    pub fn plot_id(&self) -> PlotId {
        PlotId(self.id)
    }
}

/// An operation row as stored remotely: store-assigned id plus the four
/// natural-key fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RemoteOperation {
    pub op_id: i64,
    pub plot_id: i64,
    pub op_date: NaiveDate,
    pub weight_t: Decimal,
    pub loss_pct: Decimal,
}

impl RemoteOperation {
    pub fn natural_key(&self) -> OperationKey {
        OperationKey {
            plot_id: PlotId(self.plot_id),
            date: self.op_date,
            weight_t: self.weight_t,
            loss_pct: self.loss_pct,
        }
    }
}

/// List remote plots ordered by identifier.
///
/// A failed read is reported and comes back as an empty set, so the
/// reconciler degrades to attempting everything instead of aborting.
pub async fn list_remote_plots(pool: &PgPool) -> Vec<RemotePlot> {
    match sqlx::query_as::<_, RemotePlot>("SELECT id, name, area_ha FROM plots ORDER BY id")
        .fetch_all(pool)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "plot read failed, treating remote as empty");
            println!("[db] Error listing plots: {e}");
            Vec::new()
        }
    }
}

/// List remote operations ordered by their store-assigned identifier.
/// Same empty-on-failure fallback as the plot read.
pub async fn list_remote_operations(pool: &PgPool) -> Vec<RemoteOperation> {
    match sqlx::query_as::<_, RemoteOperation>(
        "SELECT op_id, plot_id, op_date, weight_t, loss_pct FROM operations ORDER BY op_id",
    )
    .fetch_all(pool)
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "operation read failed, treating remote as empty");
            println!("[db] Error listing operations: {e}");
            Vec::new()
        }
    }
}
