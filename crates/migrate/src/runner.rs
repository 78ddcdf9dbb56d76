//! `run-migration`: apply one SQL script as a single batch.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use gearshare_core::config::ConnectionConfig;
use gearshare_core::script::MigrationScript;
use gearshare_db::batch::{self, ExecutionMode};
use gearshare_db::DbPool;

use crate::cli::RunArgs;
use crate::error::{CliError, CliResult};

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub path: PathBuf,
    pub statements: usize,
    pub rows_affected: u64,
    pub elapsed: Duration,
}

/// Load configuration, read the script, then apply it.
///
/// Steps run strictly in that order: a configuration error means the
/// script is never read, and an unreadable script means no connection is
/// opened. The connection is closed before returning either way.
pub async fn run<F>(args: &RunArgs, env: F) -> CliResult<MigrationOutcome>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ConnectionConfig::from_lookup(env)?;
    let script = MigrationScript::load(&args.path)?;
    let mode = args.execution_mode();
    let statements = script.statement_count();

    tracing::info!(
        path = %script.path().display(),
        bytes = script.byte_len(),
        statements,
        ?mode,
        "Loaded migration script",
    );

    let pool = connect(&config).await?;
    let result = apply(&pool, &script, statements, mode).await;
    pool.close().await;
    tracing::debug!("Database connection closed");

    result
}

/// Open the connection and confirm it answers.
pub(crate) async fn connect(config: &ConnectionConfig) -> CliResult<DbPool> {
    let pool = gearshare_db::create_pool(config)
        .await
        .map_err(CliError::Connect)?;

    if let Err(e) = gearshare_db::health_check(&pool).await {
        pool.close().await;
        return Err(CliError::Connect(e));
    }
    tracing::info!("Database connection established");

    Ok(pool)
}

async fn apply(
    pool: &DbPool,
    script: &MigrationScript,
    statements: usize,
    mode: ExecutionMode,
) -> CliResult<MigrationOutcome> {
    let started = Instant::now();
    let rows_affected = batch::execute_batch(pool, script.sql(), mode).await?;
    let elapsed = started.elapsed();

    tracing::info!(
        path = %script.path().display(),
        rows_affected,
        elapsed_ms = elapsed.as_millis() as u64,
        "Migration script executed",
    );

    Ok(MigrationOutcome {
        path: script.path().to_path_buf(),
        statements,
        rows_affected,
        elapsed,
    })
}
