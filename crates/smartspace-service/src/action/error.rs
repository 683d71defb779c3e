//! Errors raised by the action service.

use smartspace_core::error::{AppError, ErrorKind};
use smartspace_plugin::PluginError;
use thiserror::Error;

/// Failure of an action service operation.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The action names a smartspace or element that does not resolve.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A required field is missing, or the player or element is unknown.
    #[error("Invalid action: {0}")]
    ValidationFailed(String),

    /// The caller does not hold the role the operation requires.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// An imported action claims to be authored in the local smartspace.
    #[error("Cannot import action '{action}': player smartspace '{smartspace}' is the local smartspace")]
    ImportBoundaryViolation {
        /// Key of the offending action.
        action: String,
        /// The local smartspace name.
        smartspace: String,
    },

    /// The action type is absent or blank.
    #[error("Action type is missing")]
    MissingActionType,

    /// Plugin lookup or plugin processing failed.
    #[error("Invocation of action type '{action_type}' failed")]
    ActionInvocationFailed {
        /// Action type as supplied by the caller.
        action_type: String,
        /// Lookup or processing failure.
        #[source]
        source: PluginError,
    },

    /// A manager-scoped query failed. The cause is kept for diagnostics.
    #[error("Invalid request")]
    InvalidRequest {
        /// What actually went wrong.
        #[source]
        source: Box<ActionError>,
    },

    /// The user key does not resolve.
    #[error("User '{0}' not found")]
    UserNotFound(String),

    /// The player has never checked in.
    #[error("No check-in found for '{0}'")]
    NoCheckInFound(String),

    /// A store call failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl ActionError {
    /// Collapse any failure into [`ActionError::InvalidRequest`].
    pub fn invalid_request(cause: ActionError) -> Self {
        Self::InvalidRequest {
            source: Box::new(cause),
        }
    }

    /// Whether a plugin was found but failed, as opposed to no plugin being
    /// registered for the type.
    pub fn is_plugin_failure(&self) -> bool {
        matches!(
            self,
            Self::ActionInvocationFailed { source, .. }
                if !matches!(source, PluginError::NotRegistered { .. })
        )
    }
}

impl From<ActionError> for AppError {
    fn from(err: ActionError) -> Self {
        let message = err.to_string();
        match err {
            ActionError::Store(inner) => inner,
            ActionError::ActionInvocationFailed { source, .. } => {
                AppError::with_source(ErrorKind::Plugin, message, source)
            }
            ActionError::InvalidRequest { source } => {
                AppError::with_source(ErrorKind::BadRequest, message, *source)
            }
            ActionError::InvalidReference(_)
            | ActionError::UserNotFound(_)
            | ActionError::NoCheckInFound(_) => AppError::new(ErrorKind::NotFound, message),
            ActionError::ValidationFailed(_) | ActionError::MissingActionType => {
                AppError::new(ErrorKind::Validation, message)
            }
            ActionError::Unauthorized(_) | ActionError::ImportBoundaryViolation { .. } => {
                AppError::new(ErrorKind::Authorization, message)
            }
        }
    }
}
