//! Bridge configuration storage

use crate::error::{AutofillBridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub flush_policy: FlushPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            flush_policy: FlushPolicy::Drop,
        }
    }
}

/// What to do with buffered messages when the listener-ready signal arrives
/// but no UI surface is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Abandon the flush and discard the buffer. Matches the historical
    /// behavior: the native caller times out and the UI can retry.
    #[default]
    Drop,
    /// Keep the buffer intact; a later listener-ready signal retries the
    /// flush.
    Requeue,
    /// Abandon the flush and surface `DeliveryUnavailable` to the caller.
    Escalate,
}

pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    if !path.exists() {
        return Ok(BridgeConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AutofillBridgeError::ConfigError(e.to_string()))?;

    serde_json::from_str(&content).map_err(|e| AutofillBridgeError::ConfigError(e.to_string()))
}

pub fn save_config(path: &Path, config: &BridgeConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| AutofillBridgeError::ConfigError(e.to_string()))?;
        }
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| AutofillBridgeError::ConfigError(e.to_string()))?;

    fs::write(path, content).map_err(|e| AutofillBridgeError::ConfigError(e.to_string()))
}
