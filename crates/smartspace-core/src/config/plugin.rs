//! Action plugin configuration.

use serde::{Deserialize, Serialize};

/// Action plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PluginConfig {
    /// Built-in plugin type names to register at startup
    /// (e.g. `["CheckIn", "CheckOut"]`). Empty registers every built-in.
    #[serde(default)]
    pub enabled: Vec<String>,
}

impl PluginConfig {
    /// Whether the plugin for `action_type` should be registered.
    pub fn is_enabled(&self, action_type: &str) -> bool {
        self.enabled.is_empty()
            || self
                .enabled
                .iter()
                .any(|name| name.eq_ignore_ascii_case(action_type))
    }
}
