//! `run-migration` -- apply one SQL script to the Gearshare database.
//!
//! ```text
//! run-migration <path-to-sql-file> [--no-transaction]
//! ```
//!
//! Connection settings come from `DATABASE_URL` or the `DB_HOST`,
//! `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` tuple; `DB_SSL` and
//! `DB_SSL_RELAXED` control TLS. A `.env` file is honoured.
//!
//! Exits 0 on success and 1 on any failure.

use gearshare_migrate::cli::{self, RunArgs};
use gearshare_migrate::{logging, runner};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let args: RunArgs = cli::parse_or_exit();

    match runner::run(&args, |key| std::env::var(key).ok()).await {
        Ok(outcome) => {
            println!(
                "Migration applied: {} ({} statements, {} ms)",
                outcome.path.display(),
                outcome.statements,
                outcome.elapsed.as_millis(),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Migration failed");
            std::process::exit(1);
        }
    }
}
