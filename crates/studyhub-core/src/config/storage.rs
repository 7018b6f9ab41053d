//! Physical file store configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory; `pdf_files/` is created below it.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum upload body size in bytes (default 50 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root_path() -> String {
    ".".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MiB
}
