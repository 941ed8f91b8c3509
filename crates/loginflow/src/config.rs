//! Application config file.

use std::path::Path;

use loginflow_controller::FlowConfig;
use loginflow_dispatch::TickConfig;
use serde::{Deserialize, Serialize};

use crate::LoginflowError;

/// Everything a [`LoginApp`](crate::LoginApp) can be configured with.
///
/// ```json
/// {
///   "tick_rate_hz": 30,
///   "flow": { "message_display_ms": 1500, "locale": "en" }
/// }
/// ```
///
/// Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Controller settings.
    pub flow: FlowConfig,
    /// Owner loop rate in Hz. Clamped by the tick scheduler.
    pub tick_rate_hz: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flow: FlowConfig::default(),
            tick_rate_hz: TickConfig::default().tick_rate_hz,
        }
    }
}

impl AppConfig {
    /// Parses a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, LoginflowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoginflowError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoginflowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// The tick scheduler config for this app.
    pub fn tick_config(&self) -> TickConfig {
        TickConfig::with_rate(self.tick_rate_hz)
    }
}
