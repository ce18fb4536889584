pub mod byteparse;
pub mod cli;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing subscriber with the given log level.
pub fn init_tracing(level: Level) -> eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::builder().parse_lossy(level.to_string()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(cfg!(debug_assertions))
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()?;
    Ok(())
}
