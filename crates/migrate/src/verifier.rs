//! `verify-migration`: read-only schema checks.

use gearshare_core::config::ConnectionConfig;
use gearshare_core::verification::VerificationReport;

use crate::cli::VerifyArgs;
use crate::error::{CliError, CliResult};
use crate::runner::connect;

/// Load configuration, then run every check against the database.
///
/// Identifier validation happens before connecting. The first query error
/// aborts the remaining checks. The connection is closed before returning.
pub async fn run<F>(args: &VerifyArgs, env: F) -> CliResult<VerificationReport>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ConnectionConfig::from_lookup(env)?;
    let targets = args.targets()?;

    let pool = connect(&config).await?;
    let result = gearshare_db::verify::verify(&pool, &targets).await;
    pool.close().await;
    tracing::debug!("Database connection closed");

    let report = result?;
    tracing::info!(
        checks = report.checks.len(),
        failed = report.failed_count(),
        "Verification complete",
    );
    Ok(report)
}

/// Render the report in the requested format.
pub fn render(report: &VerificationReport, json: bool) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

/// Under `--strict`, turn failed checks into an error.
pub fn enforce(report: &VerificationReport, strict: bool) -> CliResult<()> {
    if strict && !report.all_passed() {
        return Err(CliError::ChecksFailed {
            failed: report.failed_count(),
            total: report.checks.len(),
        });
    }
    Ok(())
}
