pub mod config;
pub mod models;
pub mod pipeline;
pub mod scan_config; // Scan tuning overrides (guidance ceiling, tip length)

pub use pipeline::scan::{scan_in_background, DetectionResult, ImageRef, SymbolScanner, TextRecognizer};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Safe to call more than once: the
/// host app may already have installed one.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

/// Scanner configured from the app data directory, for hosts that wire a
/// recognizer at startup.
pub fn scanner_from_app_config(recognizer: Box<dyn TextRecognizer + Send + Sync>) -> SymbolScanner {
    let config = scan_config::load_or_default(&config::scan_config_path());
    SymbolScanner::new(recognizer).with_config(config)
}
