use tracing_subscriber::{EnvFilter, fmt};

/// Log filter read first; `RUST_LOG` is the fallback.
pub const LOG_ENV_VAR: &str = "FOODTRACK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. Stdout carries only command output, so
/// `--json` stays parseable at any log level.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
