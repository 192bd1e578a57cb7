use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "WasteLogger";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/WasteLogger/ on all platforms, temp dir when no home is known (sandboxed mobile builds)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

/// Scan tuning overrides (optional)
pub fn scan_config_path() -> PathBuf {
    app_data_dir().join("scan_config.json")
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    if cfg!(debug_assertions) {
        "wastelogger_lib=debug".to_string()
    } else {
        "wastelogger_lib=info".to_string()
    }
}
