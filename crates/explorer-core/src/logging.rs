#![forbid(unsafe_code)]

//! Logging helpers.
//!
//! With the `tracing` feature the usual macros are re-exported at the crate
//! root. With `tracing-json` [`init`] installs a global subscriber whose
//! filter comes from `EXPLORER_LOG` (falling back to `RUST_LOG`, then
//! `warn`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "EXPLORER_LOG";

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Install a global tracing subscriber.
///
/// Returns `false` when a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init(format: LogFormat) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_pretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init(LogFormat::Json);
        assert!(!init(LogFormat::Pretty));
    }
}
