//! `CheckOut` plugin.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use smartspace_database::store::ActionStore;
use smartspace_entity::action::{ActionEntity, CHECK_OUT};
use smartspace_plugin::{ActionPlugin, PluginError, PluginInfo};

use crate::session::open_check_in;

/// Attribute under which a check-out records the key of its check-in.
pub const CHECK_IN_ATTRIBUTE: &str = "checkIn";

/// Closes the player's open attendance session.
///
/// The matching check-in is left untouched; the check-out stores its key
/// under [`CHECK_IN_ATTRIBUTE`].
#[derive(Debug, Clone)]
pub struct CheckOutPlugin {
    actions: Arc<dyn ActionStore>,
}

impl CheckOutPlugin {
    /// Create the plugin over an action store.
    pub fn new(actions: Arc<dyn ActionStore>) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl ActionPlugin for CheckOutPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            action_type: CHECK_OUT.to_string(),
            description: "Closes the open attendance session".to_string(),
        }
    }

    async fn process(&self, mut action: ActionEntity) -> Result<ActionEntity, PluginError> {
        let Some(check_in) = open_check_in(self.actions.as_ref(), &action.player_email).await?
        else {
            warn!(player = %action.player_email, "Check-out without an open check-in");
            return Err(PluginError::rejected(
                CHECK_OUT,
                format!("player '{}' has no open check-in", action.player_email),
            ));
        };

        action.more_attributes.insert(
            CHECK_IN_ATTRIBUTE.to_string(),
            Value::String(check_in.key().to_string()),
        );

        let stored = self.actions.create(&action).await?;
        info!(
            action_key = %stored.key(),
            check_in = %check_in.key(),
            player = %stored.player_email,
            "Player checked out"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use smartspace_core::types::key::{ElementKey, UserKey};
    use smartspace_database::Stores;
    use smartspace_entity::action::CHECK_IN;

    use crate::CheckInPlugin;

    fn action(action_type: &str, offset_secs: i64) -> ActionEntity {
        let mut action = ActionEntity::new(
            action_type,
            &UserKey::new("bob@x", "local"),
            &ElementKey::new("1", "local"),
        )
        .with_timestamp(Utc::now() + Duration::seconds(offset_secs));
        action.action_smartspace = "local".to_string();
        action
    }

    #[tokio::test]
    async fn test_check_out_requires_check_in() {
        let stores = Stores::in_memory();
        let plugin = CheckOutPlugin::new(stores.actions.clone());

        let result = plugin.process(action(CHECK_OUT, 0)).await;
        assert!(matches!(result, Err(PluginError::Rejected { .. })));
        assert_eq!(stores.actions.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_check_out_links_open_check_in() {
        let stores = Stores::in_memory();
        let check_in = CheckInPlugin::new(stores.actions.clone())
            .process(action(CHECK_IN, 0))
            .await
            .unwrap();

        let check_out = CheckOutPlugin::new(stores.actions.clone())
            .process(action(CHECK_OUT, 1))
            .await
            .unwrap();

        assert_eq!(
            check_out.more_attributes[CHECK_IN_ATTRIBUTE],
            check_in.key().to_string()
        );
        let unchanged = stores.actions.read_by_id(&check_in.key()).await.unwrap().unwrap();
        assert_eq!(unchanged, check_in);
    }

    #[tokio::test]
    async fn test_session_closes_once() {
        let stores = Stores::in_memory();
        let plugin = CheckOutPlugin::new(stores.actions.clone());
        CheckInPlugin::new(stores.actions.clone())
            .process(action(CHECK_IN, 0))
            .await
            .unwrap();

        plugin.process(action(CHECK_OUT, 1)).await.unwrap();
        let second = plugin.process(action(CHECK_OUT, 2)).await;
        assert!(matches!(second, Err(PluginError::Rejected { .. })));
    }

    #[tokio::test]
    async fn test_check_in_closed_on_arrival_has_no_session() {
        let stores = Stores::in_memory();
        CheckInPlugin::new(stores.actions.clone())
            .process(action(CHECK_IN, 0).with_attribute(CHECK_OUT, true))
            .await
            .unwrap();

        let result = CheckOutPlugin::new(stores.actions.clone())
            .process(action(CHECK_OUT, 1))
            .await;
        assert!(matches!(result, Err(PluginError::Rejected { .. })));
    }
}
