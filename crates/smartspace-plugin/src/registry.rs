//! Plugin registry: maps action types to the plugins that process them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use smartspace_entity::action::ActionEntity;

use crate::error::PluginError;

/// Metadata about a registered plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    /// Action type handled, in capitalized form (e.g. `CheckIn`).
    pub action_type: String,
    /// Human-readable description.
    pub description: String,
}

/// Processes actions of one type.
///
/// A plugin receives a validated, timestamped action and returns the action
/// as it was persisted (or otherwise handled).
#[async_trait]
pub trait ActionPlugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Handle one action.
    async fn process(&self, action: ActionEntity) -> Result<ActionEntity, PluginError>;
}

/// Upper-case the first character of an action type, leaving the rest as is.
///
/// `"checkIn"` and `"CheckIn"` both resolve to the `CheckIn` plugin.
pub fn capitalize(action_type: &str) -> String {
    let mut chars = action_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Registry of action plugins keyed by capitalized action type.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, Arc<dyn ActionPlugin>>>,
}

impl PluginRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under its capitalized action type.
    pub async fn register(&self, plugin: Arc<dyn ActionPlugin>) -> Result<(), PluginError> {
        let info = plugin.info();
        let action_type = capitalize(&info.action_type);

        let mut plugins = self.plugins.write().await;
        if plugins.contains_key(&action_type) {
            return Err(PluginError::AlreadyRegistered { action_type });
        }

        info!(action_type = %action_type, description = %info.description, "Registering action plugin");
        plugins.insert(action_type, plugin);
        Ok(())
    }

    /// Find the plugin for an action type.
    pub async fn resolve(&self, action_type: &str) -> Result<Arc<dyn ActionPlugin>, PluginError> {
        let action_type = capitalize(action_type);
        self.plugins
            .read()
            .await
            .get(&action_type)
            .cloned()
            .ok_or(PluginError::NotRegistered { action_type })
    }

    /// Lists registered plugin metadata, ordered by action type.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let plugins = self.plugins.read().await;
        let mut infos: Vec<PluginInfo> = plugins.values().map(|p| p.info()).collect();
        infos.sort_by(|a, b| a.action_type.cmp(&b.action_type));
        infos
    }

    /// Whether a plugin handles `action_type`.
    pub async fn contains(&self, action_type: &str) -> bool {
        self.plugins.read().await.contains_key(&capitalize(action_type))
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        self.plugins.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Noop;

    #[async_trait]
    impl ActionPlugin for Noop {
        fn info(&self) -> PluginInfo {
            PluginInfo {
                action_type: "Noop".to_string(),
                description: "does nothing".to_string(),
            }
        }

        async fn process(&self, action: ActionEntity) -> Result<ActionEntity, PluginError> {
            Ok(action)
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("checkIn"), "CheckIn");
        assert_eq!(capitalize("CheckOut"), "CheckOut");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_resolve_uses_capitalized_name() {
        let registry = PluginRegistry::new();
        registry.register(Arc::new(Noop)).await.unwrap();

        assert!(registry.resolve("noop").await.is_ok());
        assert!(registry.contains("Noop").await);
        assert!(matches!(
            registry.resolve("nOOP").await,
            Err(PluginError::NotRegistered { action_type }) if action_type == "NOOP"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_fails() {
        let registry = PluginRegistry::new();
        registry.register(Arc::new(Noop)).await.unwrap();
        assert!(matches!(
            registry.register(Arc::new(Noop)).await,
            Err(PluginError::AlreadyRegistered { .. })
        ));
        assert_eq!(registry.count().await, 1);
    }
}
