use crate::config::{AppConfig, AppEnvironment};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Failure to install the process-wide tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter '{value}' does not parse")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("a tracing subscriber is already installed")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level
/// so verbosity can be raised without a config change. Development gets
/// human-oriented output; every other environment stays compact and
/// ANSI-free for log shippers.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.telemetry.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if config.environment == AppEnvironment::Development {
        builder.pretty().try_init()
    } else {
        builder.compact().with_ansi(false).try_init()
    };
    result.map_err(TelemetryError::AlreadyInstalled)
}

fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::Filter {
        value: log_level.to_string(),
        source,
    })
}
