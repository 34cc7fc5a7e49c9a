//! Subscriber setup for the binary.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the configured level parses.
const FALLBACK_FILTER: &str = "info";

/// Install a fmt subscriber writing to stderr through a background worker.
///
/// `RUST_LOG` wins over `level`. Keep the returned guard alive until exit or
/// buffered lines are lost.
#[must_use]
pub fn init(level: &str) -> WorkerGuard {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level, env.as_deref()))
        .with_writer(writer)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("A global subscriber is already installed");
    }
    guard
}

/// `env` (`RUST_LOG`) wins over `level`; invalid filters fall back to `info`.
fn build_filter(level: &str, env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}
