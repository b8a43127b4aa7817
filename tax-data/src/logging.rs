use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn";

/// Builds the log filter. An explicit level wins over `RUST_LOG`, which wins
/// over the default (`warn`).
///
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Initializes logging to stderr. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped, so
///   calculation output on stdout stays clean.
/// - Level: `level` if given, else the RUST_LOG env var, else WARN.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_filter_accepts_bare_level() {
        let filter = make_filter(Some("debug"));

        assert!(filter.is_ok());
    }

    #[test]
    fn make_filter_accepts_directives() {
        let filter = make_filter(Some("warn,tax_core=debug"));

        assert!(filter.is_ok());
    }

    #[test]
    fn init_logging_only_succeeds_once() {
        assert!(init_logging(Some("info")).is_ok());
        assert!(init_logging(Some("info")).is_err());
    }
}
