//! `verify-migration` -- report on schema state after a migration.
//!
//! Checks, in order: column exists, enum type exists (labels sorted),
//! index exists, row counts grouped by the column. Read-only.
//!
//! Uses the same connection environment variables as `run-migration`.
//! Exits 1 on configuration or query errors, and on failed checks when
//! `--strict` is given.

use gearshare_migrate::cli::{self, VerifyArgs};
use gearshare_migrate::error::CliResult;
use gearshare_migrate::{logging, verifier};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let args: VerifyArgs = cli::parse_or_exit();

    if let Err(e) = run(&args).await {
        tracing::error!(error = %e, "Verification failed");
        std::process::exit(1);
    }
}

async fn run(args: &VerifyArgs) -> CliResult<()> {
    let report = verifier::run(args, |key| std::env::var(key).ok()).await?;
    println!("{}", verifier::render(&report, args.json)?);
    verifier::enforce(&report, args.strict)
}
