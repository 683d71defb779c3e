//! PostgreSQL implementations of the store traits.

pub mod action;
pub mod element;
pub mod user;

pub use action::ActionRepository;
pub use element::ElementRepository;
pub use user::UserRepository;

use smartspace_core::error::{AppError, ErrorKind};

/// Map an insert failure, turning primary-key violations into conflicts.
pub(crate) fn map_insert_error(err: sqlx::Error, constraint: &str, what: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(constraint) => {
            AppError::conflict(format!("{what} already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to store {what}"), err),
    }
}
