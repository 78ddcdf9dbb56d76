//! Whole-script batch execution.

use crate::DbPool;

/// Transaction handling for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Wrap the script in `BEGIN` / `COMMIT`; any failure rolls back every
    /// statement in it.
    #[default]
    Transactional,
    /// Submit the script as-is. PostgreSQL still runs a multi-statement
    /// query string as one implicit transaction unless the script issues
    /// its own `BEGIN` / `COMMIT`.
    Autocommit,
}

/// Submit `sql` to the database in a single call.
///
/// Uses the simple query protocol, so the script may hold any number of
/// statements. Returns the total rows affected.
pub async fn execute_batch(
    pool: &DbPool,
    sql: &str,
    mode: ExecutionMode,
) -> Result<u64, sqlx::Error> {
    match mode {
        ExecutionMode::Transactional => {
            let mut tx = pool.begin().await?;
            // Dropping `tx` on error rolls back.
            let result = sqlx::raw_sql(sql).execute(&mut *tx).await?;
            tx.commit().await?;
            Ok(result.rows_affected())
        }
        ExecutionMode::Autocommit => {
            let result = sqlx::raw_sql(sql).execute(pool).await?;
            Ok(result.rows_affected())
        }
    }
}
