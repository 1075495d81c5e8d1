//! Upload staging configuration.

use serde::{Deserialize, Serialize};

/// Settings for the client-side upload staging store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Maximum number of files that may be queued for upload at once.
    #[serde(default = "default_max_staged_files")]
    pub max_staged_files: usize,
    /// Maximum size in bytes of a single queued file.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            max_staged_files: default_max_staged_files(),
            max_file_size_bytes: default_max_file_size(),
        }
    }
}

fn default_max_staged_files() -> usize {
    256
}

fn default_max_file_size() -> u64 {
    // 100 MiB
    100 * 1024 * 1024
}
