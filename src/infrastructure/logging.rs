use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// Calling this twice is harmless; the second subscriber is dropped.
pub fn init_logging(config: &LoggingConfig) {
    let (json, pretty) = match config.format {
        LogFormat::Json => (
            Some(fmt::layer().json().with_span_events(FmtSpan::CLOSE)),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(fmt::layer().pretty().with_span_events(FmtSpan::CLOSE)),
        ),
    };

    let installed = tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(json)
        .with(pretty)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
