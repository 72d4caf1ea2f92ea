//! Logging setup
//!
//! Everything logs through `tracing`. The filter comes from the
//! `CALCULATOR_LOG` environment variable when set, otherwise from the
//! level in the settings file.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "CALCULATOR_LOG";

/// Build the filter: the environment wins, then `level`, then `info`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the stderr subscriber. Calling this again is a no-op.
pub fn init(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
