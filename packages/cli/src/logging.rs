use todo_config as vars;
use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber (compact format, RUST_LOG aware)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(vars::RUST_LOG)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .compact()
        .init();
}
