//! Tracing subscriber setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Call once at
/// startup; a second call panics because the global subscriber is already
/// set.
pub fn init(config: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("librarium={}", config.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
