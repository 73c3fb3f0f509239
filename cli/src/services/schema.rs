//! Idempotent schema provisioning for the backing store

use sqlx::PgPool;

// Identity defaults keep explicit id inserts possible for plots while the
// store still assigns op_id for operations.
const DDL_PLOTS: &str = r#"
CREATE TABLE plots (
  id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
  name TEXT NOT NULL,
  area_ha NUMERIC(10,2) NOT NULL
)
"#;

const DDL_OPERATIONS: &str = r#"
CREATE TABLE operations (
  op_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
  plot_id BIGINT NOT NULL REFERENCES plots(id),
  op_date DATE NOT NULL,
  weight_t NUMERIC(12,2) NOT NULL,
  loss_pct NUMERIC(5,2) NOT NULL
)
"#;

/// SQLSTATE for duplicate_table
const DUPLICATE_TABLE: &str = "42P07";

/// Ensure both tables exist.
///
/// "Already exists" counts as success; any other error is reported for that
/// table and the sibling table is still attempted. Safe to call on every
/// sync.
pub async fn ensure_schema(pool: &PgPool) {
    for (table, ddl) in [("plots", DDL_PLOTS), ("operations", DDL_OPERATIONS)] {
        match sqlx::query(ddl).execute(pool).await {
            Ok(_) => tracing::info!(table, "table created"),
            Err(e) if is_duplicate_table(&e) => {
                tracing::debug!(table, "table already exists");
            }
            Err(e) => println!("[db] Error creating table {table}: {e}"),
        }
    }
    println!("Tables checked/created.");
}

fn is_duplicate_table(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(DUPLICATE_TABLE)
    )
}
