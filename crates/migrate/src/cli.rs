//! Command-line arguments for both binaries.

use std::path::PathBuf;

use clap::Parser;

use gearshare_core::verification::{
    VerifyTargets, DEFAULT_COLUMN, DEFAULT_ENUM_TYPE, DEFAULT_INDEX, DEFAULT_SCHEMA, DEFAULT_TABLE,
};
use gearshare_db::batch::ExecutionMode;

use crate::error::CliResult;

/// Apply a SQL migration script to the Gearshare database.
#[derive(Debug, Parser)]
#[command(name = "run-migration", version, about)]
pub struct RunArgs {
    /// Path to the SQL script to execute.
    pub path: PathBuf,

    /// Submit the script without wrapping it in BEGIN/COMMIT.
    #[arg(long)]
    pub no_transaction: bool,
}

impl RunArgs {
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.no_transaction {
            ExecutionMode::Autocommit
        } else {
            ExecutionMode::Transactional
        }
    }
}

/// Inspect the schema after a migration and print what was found.
#[derive(Debug, Parser)]
#[command(name = "verify-migration", version, about)]
pub struct VerifyArgs {
    /// Schema holding the table and enum type.
    #[arg(long, default_value = DEFAULT_SCHEMA)]
    pub schema: String,

    /// Table to inspect.
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Column expected on the table; also used for the row counts.
    #[arg(long, default_value = DEFAULT_COLUMN)]
    pub column: String,

    /// Enum type expected to exist.
    #[arg(long, default_value = DEFAULT_ENUM_TYPE)]
    pub enum_type: String,

    /// Index expected on the table.
    #[arg(long, default_value = DEFAULT_INDEX)]
    pub index: String,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when any check fails.
    #[arg(long)]
    pub strict: bool,
}

impl VerifyArgs {
    pub fn targets(&self) -> CliResult<VerifyTargets> {
        Ok(VerifyTargets::new(
            &self.schema,
            &self.table,
            &self.column,
            &self.enum_type,
            &self.index,
        )?)
    }
}

/// Parse arguments, exiting with status 1 on a usage error.
///
/// clap's own exit code for usage errors is 2; both tools promise 1 for
/// every failure. `--help` and `--version` still exit 0.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
