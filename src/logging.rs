use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stdout.
///
/// The filter comes from `RUST_LOG` when set.
pub fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wiki_server=debug,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
