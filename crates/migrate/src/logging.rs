//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
///
/// Each binary is its own crate (`run_migration`, `verify_migration`), and
/// the final error report is logged from there.
pub const DEFAULT_FILTER: &str =
    "run_migration=info,verify_migration=info,gearshare_migrate=info,gearshare_db=info";

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// command output.
///
/// `LOG_FORMAT=json` switches to one JSON object per line.
pub fn init() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
