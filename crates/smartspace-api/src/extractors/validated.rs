//! Request body validation.

use validator::Validate;

use smartspace_core::error::AppError;

/// Run `validator` rules on a request DTO, returning it when it passes.
pub fn validated<T: Validate>(request: T) -> Result<T, AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    Ok(request)
}
