//! Tree synchronization engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for the tree synchronization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Buffer size of the engine command channel. Operations submitted
    /// beyond this bound apply backpressure to callers rather than being
    /// dropped.
    #[serde(default = "default_command_buffer")]
    pub command_buffer_size: usize,
    /// Maximum number of items accepted by a single batch operation.
    #[serde(default = "default_max_batch_items")]
    pub max_batch_items: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: default_command_buffer(),
            max_batch_items: default_max_batch_items(),
        }
    }
}

fn default_command_buffer() -> usize {
    64
}

fn default_max_batch_items() -> usize {
    500
}
