//! `CheckIn` plugin.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use smartspace_database::store::ActionStore;
use smartspace_entity::action::{ActionEntity, CHECK_IN};
use smartspace_plugin::{ActionPlugin, PluginError, PluginInfo};

/// Opens an attendance session by storing the check-in.
#[derive(Debug, Clone)]
pub struct CheckInPlugin {
    actions: Arc<dyn ActionStore>,
}

impl CheckInPlugin {
    /// Create the plugin over an action store.
    pub fn new(actions: Arc<dyn ActionStore>) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl ActionPlugin for CheckInPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            action_type: CHECK_IN.to_string(),
            description: "Opens an attendance session".to_string(),
        }
    }

    async fn process(&self, action: ActionEntity) -> Result<ActionEntity, PluginError> {
        let stored = self.actions.create(&action).await?;
        info!(
            action_key = %stored.key(),
            player = %stored.player_email,
            element = %stored.element_key(),
            "Player checked in"
        );
        Ok(stored)
    }
}
