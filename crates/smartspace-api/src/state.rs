//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use smartspace_core::config::AppConfig;
use smartspace_database::Stores;
use smartspace_plugin::PluginRegistry;
use smartspace_service::{ActionService, ElementService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Action, user, and element stores
    pub stores: Stores,
    /// Registered action plugins
    pub plugins: Arc<PluginRegistry>,

    // ── Services ─────────────────────────────────────────────
    /// Action service
    pub action_service: Arc<ActionService>,
    /// User service
    pub user_service: Arc<UserService>,
    /// Element service
    pub element_service: Arc<ElementService>,
}

impl AppState {
    /// Build the services over `stores` and `plugins`.
    pub fn new(config: AppConfig, stores: Stores, plugins: Arc<PluginRegistry>) -> Self {
        let local = config.smartspace.name.clone();

        let action_service = Arc::new(ActionService::new(
            stores.actions.clone(),
            stores.users.clone(),
            stores.elements.clone(),
            Arc::clone(&plugins),
            local.clone(),
        ));
        let user_service = Arc::new(UserService::new(stores.users.clone()));
        let element_service = Arc::new(ElementService::new(
            stores.elements.clone(),
            stores.users.clone(),
            local,
        ));

        Self {
            config: Arc::new(config),
            stores,
            plugins,
            action_service,
            user_service,
            element_service,
        }
    }

    /// Name of the local smartspace.
    pub fn local_smartspace(&self) -> &str {
        &self.config.smartspace.name
    }
}
