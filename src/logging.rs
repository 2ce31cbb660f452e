use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` sets the filter (default `info`); `LOG_FORMAT=json` switches
/// to one JSON object per line. Fails if a subscriber is already set.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = std::env::var("LOG_FORMAT").unwrap_or_default();

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    };

    result.map_err(|e| Error::Tracing(e.to_string()))
}
