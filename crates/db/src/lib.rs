//! PostgreSQL access for the migration tools.
//!
//! Each tool opens one [`DbPool`] capped at a single connection, uses it
//! sequentially and closes it before exiting.

use std::str::FromStr;
use std::time::Duration;

use gearshare_core::config::{ConnectionConfig, DbTarget, TlsPolicy};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

pub mod batch;
pub mod catalog;
pub mod verify;

pub type DbPool = sqlx::PgPool;

/// How long to wait for the connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Translate a [`ConnectionConfig`] into driver connect options.
pub fn connect_options(config: &ConnectionConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let options = match config.target() {
        DbTarget::Url(url) => PgConnectOptions::from_str(url)?,
        DbTarget::Params {
            host,
            port,
            database,
            user,
            password,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .database(database)
            .username(user)
            .password(password),
    };

    Ok(match config.tls() {
        TlsPolicy::Inherit => options,
        TlsPolicy::Disabled => options.ssl_mode(PgSslMode::Disable),
        TlsPolicy::Relaxed => options.ssl_mode(PgSslMode::Require),
        TlsPolicy::Verified => options.ssl_mode(PgSslMode::VerifyFull),
    })
}

/// Open a single-connection pool for one tool invocation.
pub async fn create_pool(config: &ConnectionConfig) -> Result<DbPool, sqlx::Error> {
    let options = connect_options(config)?;
    tracing::debug!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or("<default>"),
        tls = ?config.tls(),
        "Connecting to database",
    );

    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}

/// Verify the database connection is alive.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
