use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "warn,kuku_ledger=info";

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| configured.unwrap_or(DEFAULT_LOG_FILTER).into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
