//! Background refresh configuration.

use serde::{Deserialize, Serialize};

/// Settings for the polling-based background refresh placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Whether the background refresh scheduler runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Poll interval in seconds.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    30
}
