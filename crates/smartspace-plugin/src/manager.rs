//! Plugin manager: registers compiled-in plugins allowed by configuration.

use std::sync::Arc;

use tracing::{debug, info};

use smartspace_core::config::plugin::PluginConfig;

use crate::error::PluginError;
use crate::registry::{ActionPlugin, PluginRegistry, capitalize};

/// Owns the registry and decides which plugins get into it.
#[derive(Debug)]
pub struct PluginManager {
    registry: Arc<PluginRegistry>,
    config: PluginConfig,
}

impl PluginManager {
    /// Creates a manager with an empty registry.
    pub fn new(config: PluginConfig) -> Self {
        Self {
            registry: Arc::new(PluginRegistry::new()),
            config,
        }
    }

    /// Register `plugin` if its action type is enabled.
    ///
    /// Returns whether the plugin was registered.
    pub async fn load_plugin(&self, plugin: Arc<dyn ActionPlugin>) -> Result<bool, PluginError> {
        let action_type = capitalize(&plugin.info().action_type);
        if !self.config.is_enabled(&action_type) {
            debug!(action_type = %action_type, "Plugin disabled by configuration, skipping");
            return Ok(false);
        }

        self.registry.register(plugin).await?;
        Ok(true)
    }

    /// Register every plugin in `plugins` that is enabled.
    pub async fn load_all(
        &self,
        plugins: impl IntoIterator<Item = Arc<dyn ActionPlugin>>,
    ) -> Result<usize, PluginError> {
        let mut loaded = 0;
        for plugin in plugins {
            if self.load_plugin(plugin).await? {
                loaded += 1;
            }
        }
        info!(loaded, "Action plugins loaded");
        Ok(loaded)
    }

    /// The populated registry.
    pub fn registry(&self) -> Arc<PluginRegistry> {
        Arc::clone(&self.registry)
    }
}
