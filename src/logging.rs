use std::io;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Only the first call installs anything; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
