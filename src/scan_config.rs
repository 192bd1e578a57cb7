//! Scan tuning, optionally overridden from `scan_config.json` in the app data directory.
//!
//! Every field has a default matching the built-in constants, so a partial file
//! (or none at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::scan::confidence::thresholds;
use crate::pipeline::scan::guidance::GuidancePolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scan config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scan config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Results at or below this confidence carry a guidance tip.
    pub guidance_ceiling: u8,
    /// Max characters of recognized text quoted back in a tip.
    pub tip_text_limit: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            guidance_ceiling: thresholds::GUIDANCE_CEILING,
            tip_text_limit: 100,
        }
    }
}

impl ScanConfig {
    pub fn guidance_policy(&self) -> GuidancePolicy {
        GuidancePolicy {
            ceiling: self.guidance_ceiling,
            text_limit: self.tip_text_limit,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.guidance_ceiling > 100 {
            return Err(ConfigError::InvalidValue {
                field: "guidance_ceiling",
                reason: format!("{} is above 100", self.guidance_ceiling),
            });
        }
        if self.tip_text_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tip_text_limit",
                reason: "must be at least 1".into(),
            });
        }
        Ok(self)
    }
}

/// Read and validate a scan config file.
pub fn load_scan_config(path: &Path) -> Result<ScanConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config: ScanConfig = serde_json::from_str(&raw)?;
    config.validate()
}

/// Read the scan config, falling back to defaults when the file is absent or invalid.
pub fn load_or_default(path: &Path) -> ScanConfig {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No scan config file, using defaults");
        return ScanConfig::default();
    }

    match load_scan_config(path) {
        Ok(config) => {
            tracing::info!(
                path = %path.display(),
                guidance_ceiling = config.guidance_ceiling,
                tip_text_limit = config.tip_text_limit,
                "Loaded scan config"
            );
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring scan config");
            ScanConfig::default()
        }
    }
}
