//! Action service: the orchestration layer over the action, user, and
//! element stores and the plugin registry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use smartspace_core::types::key::{ActionKey, UserKey};
use smartspace_core::types::pagination::PageRequest;
use smartspace_core::types::sorting::SortField;
use smartspace_database::store::{ActionStore, ElementStore, SORT_CREATED, SORT_KEY, UserStore};
use smartspace_entity::action::{ActionEntity, CHECK_IN, CHECK_OUT};
use smartspace_entity::user::UserRole;
use smartspace_plugin::{PluginError, PluginRegistry};

use super::error::ActionError;
use super::validation::{is_present, validate};
use crate::clock::MonotonicClock;

/// Upper-boundary sentinel meaning "no upper bound, use now".
pub const EMPTY_BOUNDARY: &str = "empty";

/// Creates, imports, invokes, and queries actions.
#[derive(Debug)]
pub struct ActionService {
    /// Action store.
    actions: Arc<dyn ActionStore>,
    /// User store.
    users: Arc<dyn UserStore>,
    /// Element store.
    elements: Arc<dyn ElementStore>,
    /// Plugins by action type.
    plugins: Arc<PluginRegistry>,
    /// Name of the local smartspace.
    local_smartspace: String,
    /// Source of invocation timestamps.
    clock: MonotonicClock,
}

impl ActionService {
    /// Creates a new action service.
    pub fn new(
        actions: Arc<dyn ActionStore>,
        users: Arc<dyn UserStore>,
        elements: Arc<dyn ElementStore>,
        plugins: Arc<PluginRegistry>,
        local_smartspace: impl Into<String>,
    ) -> Self {
        Self {
            actions,
            users,
            elements,
            plugins,
            local_smartspace: local_smartspace.into(),
            clock: MonotonicClock::new(),
        }
    }

    /// Name of the local smartspace.
    pub fn local_smartspace(&self) -> &str {
        &self.local_smartspace
    }

    /// Store a locally authored action. The store assigns its identity and
    /// the service its timestamp; a caller-supplied timestamp is discarded.
    pub async fn new_action(&self, mut action: ActionEntity) -> Result<ActionEntity, ActionError> {
        if action.player_smartspace != self.local_smartspace {
            return Err(ActionError::InvalidReference(format!(
                "player smartspace '{}' is not the local smartspace '{}'",
                action.player_smartspace, self.local_smartspace
            )));
        }

        if self.elements.read_by_id(&action.element_key()).await?.is_none() {
            return Err(ActionError::InvalidReference(format!(
                "element '{}' does not exist",
                action.element_key()
            )));
        }

        validate(&action, self.users.as_ref(), self.elements.as_ref()).await?;

        action.action_smartspace = self.local_smartspace.clone();
        action.creation_timestamp = self.clock.tick();
        let created = self.actions.create(&action).await?;

        info!(
            action_key = %created.key(),
            action_type = %created.action_type,
            player = %created.player_key(),
            "Action created"
        );

        Ok(created)
    }

    /// Import actions authored in other smartspaces, all or none.
    ///
    /// The caller must be an admin; no action may name the local smartspace
    /// as its player smartspace.
    pub async fn store(
        &self,
        admin_smartspace: &str,
        admin_email: &str,
        actions: Vec<ActionEntity>,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let role = self.users.get_user_role(admin_smartspace, admin_email).await?;
        if !role.is_some_and(|r| r.is_admin()) {
            warn!(
                caller = %UserKey::new(admin_email, admin_smartspace),
                "Import refused: caller is not an admin"
            );
            return Err(ActionError::Unauthorized(
                "only admins may import actions".to_string(),
            ));
        }

        if let Some(local) = actions
            .iter()
            .find(|a| a.player_smartspace == self.local_smartspace)
        {
            return Err(ActionError::ImportBoundaryViolation {
                action: local.key().to_string(),
                smartspace: self.local_smartspace.clone(),
            });
        }

        let imported = self.actions.insert_all(&actions).await?;

        info!(
            caller = %UserKey::new(admin_email, admin_smartspace),
            count = imported.len(),
            "Actions imported"
        );

        Ok(imported)
    }

    /// Validate, timestamp, and hand an action to the plugin for its type.
    pub async fn invoke(&self, mut action: ActionEntity) -> Result<ActionEntity, ActionError> {
        if !is_present(&action.action_type) {
            return Err(ActionError::MissingActionType);
        }

        validate(&action, self.users.as_ref(), self.elements.as_ref()).await?;

        action.action_id.clear();
        action.action_smartspace = self.local_smartspace.clone();
        action.creation_timestamp = self.clock.tick();

        let action_type = action.action_type.clone();
        let processed = match self.dispatch(action).await {
            Ok(processed) => processed,
            Err(source) => {
                let err = ActionError::ActionInvocationFailed {
                    action_type: action_type.clone(),
                    source,
                };
                if err.is_plugin_failure() {
                    warn!(action_type = %action_type, error = %err, "Plugin failed");
                } else {
                    warn!(action_type = %action_type, "No plugin registered for action type");
                }
                return Err(err);
            }
        };

        info!(
            action_key = %processed.key(),
            action_type = %action_type,
            player = %processed.player_key(),
            "Action invoked"
        );

        Ok(processed)
    }

    /// Most recent action of `email` whose type contains `action_type`.
    ///
    /// The page applies to the underlying query, before the most recent
    /// action is picked: it is only found if the page contains it.
    pub async fn get_action_by_type_and_email(
        &self,
        page: PageRequest,
        email: &str,
        action_type: &str,
    ) -> Result<Option<ActionEntity>, ActionError> {
        let found = self.by_type_newest_first(page, email, action_type).await?;
        Ok(found.into_iter().next())
    }

    /// Actions between the latest check-in of `email` and its check-out
    /// (or now, while the session is open), oldest first.
    pub async fn get_all_actions_between_check_in_and_check_out_by_time(
        &self,
        page: PageRequest,
        email: &str,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let check_in = self
            .get_action_by_type_and_email(page, email, CHECK_IN)
            .await?
            .ok_or_else(|| ActionError::NoCheckInFound(email.to_string()))?;

        if check_in.is_checked_out() {
            debug!(action_key = %check_in.key(), "Check-in already closed");
            return Ok(vec![check_in]);
        }

        let start = check_in.creation_timestamp;
        let mut end = self.clock.now();

        let has_check_out = self
            .get_action_by_type_and_email(PageRequest::unpaged(), email, CHECK_OUT)
            .await?
            .is_some();
        if has_check_out {
            let check_out = self
                .get_action_by_type_and_email(page, email, CHECK_OUT)
                .await?;
            if let Some(check_out) = check_out.filter(|c| c.creation_timestamp > start) {
                end = check_out.creation_timestamp;
            }
        }

        let mut window = self.actions.read_available(start, end, page).await?;
        window.sort_by_key(|a| a.creation_timestamp);
        Ok(window)
    }

    /// Actions of `email` whose type contains `action_type`, newest first,
    /// or `None` when there are none.
    pub async fn get_actions_list_by_type(
        &self,
        page: PageRequest,
        email: &str,
        action_type: &str,
    ) -> Result<Option<Vec<ActionEntity>>, ActionError> {
        let found = self.by_type_newest_first(page, email, action_type).await?;
        Ok((!found.is_empty()).then_some(found))
    }

    /// All actions ordered by key. `key` must name an admin user.
    pub async fn get_action_using_pagination(
        &self,
        key: &str,
        page: PageRequest,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let user_key: UserKey = key
            .parse()
            .map_err(|_| ActionError::UserNotFound(key.to_string()))?;

        let user = self
            .users
            .read_by_id(&user_key)
            .await?
            .ok_or_else(|| ActionError::UserNotFound(key.to_string()))?;

        if !user.role.is_admin() {
            return Err(ActionError::Unauthorized(
                "only admins may list all actions".to_string(),
            ));
        }

        Ok(self.actions.read_all(&SortField::asc(SORT_KEY), page).await?)
    }

    /// Actions of `user_email` with type `action_type` between the
    /// timestamps of two actions of `smartspace`.
    ///
    /// An unknown `from_action` starts the window now; an unknown, absent,
    /// or [`EMPTY_BOUNDARY`] `to_action` ends it now.
    pub async fn get_actions_list_by_time_stamp_and_type(
        &self,
        page: PageRequest,
        user_email: &str,
        action_type: &str,
        from_action: &str,
        to_action: Option<&str>,
        smartspace: &str,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let now = self.clock.now();

        let from = self
            .timestamp_of(from_action, smartspace)
            .await?
            .unwrap_or(now);

        let to = match to_action {
            Some(id) if id != EMPTY_BOUNDARY => {
                self.timestamp_of(id, smartspace).await?.unwrap_or(now)
            }
            _ => now,
        };

        Ok(self
            .actions
            .read_available_by_email_and_type(from, to, user_email, action_type, page)
            .await?)
    }

    /// Actions of `manager_smartspace` with type `action_type` created in
    /// `[from, to]`. The caller must be a manager there.
    pub async fn get_all_actions_list_by_time_stamp_and_type(
        &self,
        page: PageRequest,
        manager_email: &str,
        action_type: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        manager_smartspace: &str,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let result: Result<Vec<ActionEntity>, ActionError> = async {
            self.require_manager(manager_smartspace, manager_email)
                .await?;
            Ok(self
                .actions
                .read_all_available_by_type_and_timestamps(
                    from,
                    to,
                    manager_smartspace,
                    action_type,
                    page,
                )
                .await?)
        }
        .await;

        result.map_err(ActionError::invalid_request)
    }

    /// Actions of `manager_smartspace` with type `action_type`. The caller
    /// must be a manager there.
    pub async fn get_all_actions_list_by_type(
        &self,
        page: PageRequest,
        manager_email: &str,
        action_type: &str,
        manager_smartspace: &str,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let result: Result<Vec<ActionEntity>, ActionError> = async {
            self.require_manager(manager_smartspace, manager_email)
                .await?;
            Ok(self
                .actions
                .read_all_available_by_type(manager_smartspace, action_type, page)
                .await?)
        }
        .await;

        result.map_err(ActionError::invalid_request)
    }

    /// Delete an action by key. Deleting a missing action is not an error.
    pub async fn delete_by_key(&self, key: &ActionKey) -> Result<(), ActionError> {
        let deleted = self.actions.delete_by_id(key).await?;
        info!(action_key = %key, deleted, "Action delete requested");
        Ok(())
    }

    async fn dispatch(&self, action: ActionEntity) -> Result<ActionEntity, PluginError> {
        let plugin = self.plugins.resolve(&action.action_type).await?;
        plugin.process(action).await
    }

    async fn by_type_newest_first(
        &self,
        page: PageRequest,
        email: &str,
        action_type: &str,
    ) -> Result<Vec<ActionEntity>, ActionError> {
        let mut found = self
            .actions
            .read_with_type_containing_and_email(
                &SortField::asc(SORT_CREATED),
                email,
                action_type,
                page,
            )
            .await?;
        found.sort_by(|a, b| b.creation_timestamp.cmp(&a.creation_timestamp));
        Ok(found)
    }

    async fn timestamp_of(
        &self,
        action_id: &str,
        smartspace: &str,
    ) -> Result<Option<DateTime<Utc>>, ActionError> {
        let action = self
            .actions
            .read_by_id(&ActionKey::new(action_id, smartspace))
            .await?;
        Ok(action.map(|a| a.creation_timestamp))
    }

    async fn require_manager(&self, smartspace: &str, email: &str) -> Result<(), ActionError> {
        match self.users.get_user_role(smartspace, email).await? {
            Some(UserRole::Manager) => Ok(()),
            _ => Err(ActionError::Unauthorized(format!(
                "'{email}' is not a manager of '{smartspace}'"
            ))),
        }
    }
}
