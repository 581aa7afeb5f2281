//! Log output setup
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! also captures those records.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// Install the global subscriber. `RUST_LOG` overrides `config.level`.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.timestamps {
        tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(layer.without_time())
            .with(filter)
            .init();
    }
}
