use tracing_subscriber::EnvFilter;

use crate::error::FrontendError;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` (a filter directive such as
/// `"info"` or `"realms_core=debug"`) is used.
pub fn init(level: &str) -> Result<(), FrontendError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| FrontendError::Logging(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .try_init()
        .map_err(|e| FrontendError::Logging(e.to_string()))
}
