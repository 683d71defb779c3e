//! `Echo` plugin: persists the action exactly as received.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use smartspace_database::store::ActionStore;
use smartspace_entity::action::ActionEntity;

use crate::error::PluginError;
use crate::registry::{ActionPlugin, PluginInfo};

/// Action type handled by [`EchoPlugin`].
pub const ECHO: &str = "Echo";

/// Stores the action without further processing.
#[derive(Debug, Clone)]
pub struct EchoPlugin {
    actions: Arc<dyn ActionStore>,
}

impl EchoPlugin {
    /// Create the plugin over an action store.
    pub fn new(actions: Arc<dyn ActionStore>) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl ActionPlugin for EchoPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            action_type: ECHO.to_string(),
            description: "Persists the action unchanged".to_string(),
        }
    }

    async fn process(&self, action: ActionEntity) -> Result<ActionEntity, PluginError> {
        let stored = self.actions.create(&action).await?;
        debug!(action_key = %stored.key(), "Echo action stored");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspace_core::types::key::{ElementKey, UserKey};
    use smartspace_database::Stores;

    #[tokio::test]
    async fn test_echo_persists_action() {
        let stores = Stores::in_memory();
        let plugin = EchoPlugin::new(stores.actions.clone());

        let mut action = ActionEntity::new(
            "echo",
            &UserKey::new("a@x", "local"),
            &ElementKey::new("1", "local"),
        )
        .with_attribute("note", "hi");
        action.action_smartspace = "local".to_string();

        let stored = plugin.process(action).await.unwrap();
        assert!(!stored.action_id.is_empty());
        assert_eq!(stored.more_attributes["note"], "hi");
        assert!(stores.actions.read_by_id(&stored.key()).await.unwrap().is_some());
    }
}
