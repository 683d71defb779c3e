//! Errors raised while resolving or running an action plugin.

use smartspace_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Failure of plugin lookup or plugin processing.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No plugin is registered for the action type.
    #[error("No plugin registered for action type '{action_type}'")]
    NotRegistered {
        /// Capitalized action type that was looked up.
        action_type: String,
    },

    /// A plugin with the same action type is already registered.
    #[error("Plugin for action type '{action_type}' is already registered")]
    AlreadyRegistered {
        /// The duplicated action type.
        action_type: String,
    },

    /// The plugin refused to process the action.
    #[error("Plugin '{plugin}' rejected the action: {reason}")]
    Rejected {
        /// Action type of the rejecting plugin.
        plugin: String,
        /// Why the action was refused.
        reason: String,
    },

    /// A store call made by the plugin failed.
    #[error("Plugin store access failed: {0}")]
    Store(#[from] AppError),
}

impl PluginError {
    /// Build a [`PluginError::Rejected`].
    pub fn rejected(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::Store(inner) => inner,
            other @ PluginError::AlreadyRegistered { .. } => AppError::conflict(other.to_string()),
            other => AppError::with_source(ErrorKind::Plugin, other.to_string(), other),
        }
    }
}
