//! Initialisation du logging

use smilconfig::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installe le subscriber global
///
/// `RUST_LOG` prime sur `host.logger.min_level`. Sans sortie console, aucun
/// subscriber n'est installé.
pub fn init_logging(config: &Config) {
    if !config.get_log_enable_console() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.get_log_min_level().to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
