// Reestructura - util/logging.rs
//
// Structured logging setup.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//
// Output: stderr. The tool has no console UI of its own, so stderr is only
// visible when launched from a terminal; dialog notifications remain the
// user-facing channel.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// Priority: RUST_LOG env var > default level.
pub fn init() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
