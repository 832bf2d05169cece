use shared::CycleTrackerConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns false if a subscriber
/// was already installed, which leaves the existing one in place.
pub fn init_logging(config: &CycleTrackerConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
