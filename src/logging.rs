//! Tracing setup for binaries that drive the runner.
//!
//! Engine code only emits events. A subscriber is installed by the embedding
//! binary or by the top-level [`run`](crate::runner::run) entry point.
//! `VERDICT_LOG` takes precedence over the configured level.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "VERDICT_LOG";
pub const DEFAULT_FILTER: &str = "warn";

static INIT: OnceCell<()> = OnceCell::new();

/// Resolves the filter from the environment, then `level`, then the default.
pub fn filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a stderr subscriber once per process.
pub fn init(level: Option<&str>) {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
