use gearshare_core::error::CoreError;

/// Errors surfaced by the migration commands.
///
/// Every variant ends the process with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration or input problem detected before touching the database.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database could not be reached.
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// The database rejected a statement or query.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// `--strict` verification found failing checks.
    #[error("Verification failed: {failed} of {total} checks did not pass")]
    ChecksFailed { failed: usize, total: usize },

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
