//! Convenience result type alias for Smartspace.

use crate::error::AppError;

/// A specialized `Result` type for Smartspace operations.
pub type AppResult<T> = Result<T, AppError>;
